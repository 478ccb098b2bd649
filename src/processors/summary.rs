//! Per-label aggregation of detections.

use crate::domain::Detection;
use std::fmt;

/// Rendered text when nothing was detected.
pub const NO_ISSUES: &str = "None";

/// Occurrence counts per label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSummary {
    entries: Vec<(String, usize)>,
}

impl IssueSummary {
    /// Counts the labels of `detections`.
    pub fn from_detections(detections: &[Detection]) -> Self {
        Self::from_labels(detections.iter().map(|d| d.label.as_str()))
    }

    /// Counts a sequence of labels.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        for label in labels {
            match entries.iter_mut().find(|(seen, _)| seen == label) {
                Some((_, count)) => *count += 1,
                None => entries.push((label.to_string(), 1)),
            }
        }
        Self { entries }
    }

    /// `(label, count)` pairs in first-seen order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn count_of(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(seen, _)| seen == label)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders e.g. `"2 Cariess, 1 Filling"`, or `"None"`.
    ///
    /// The plural is a bare trailing `s` for any count above one.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return NO_ISSUES.to_string();
        }
        self.entries
            .iter()
            .map(|(label, count)| {
                let suffix = if *count > 1 { "s" } else { "" };
                format!("{count} {label}{suffix}")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for IssueSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order_and_plural() {
        let summary = IssueSummary::from_labels(["A", "B", "A"]);
        assert_eq!(summary.render(), "2 As, 1 B");
        assert_eq!(summary.count_of("A"), 2);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_empty_renders_none() {
        let summary = IssueSummary::from_labels([]);
        assert!(summary.is_empty());
        assert_eq!(summary.render(), "None");
        assert_eq!(summary.to_string(), "None");
    }

    #[test]
    fn test_singletons() {
        let summary = IssueSummary::from_labels(["Caries", "Filling"]);
        assert_eq!(summary.render(), "1 Caries, 1 Filling");
    }

    #[test]
    fn test_naive_plural_is_kept() {
        let summary = IssueSummary::from_labels(["Caries", "Caries", "Bridge"]);
        assert_eq!(summary.render(), "2 Cariess, 1 Bridge");
    }

    #[test]
    fn test_counts_do_not_depend_on_order() {
        let a = IssueSummary::from_labels(["X", "Y", "X", "Y", "Y"]);
        let b = IssueSummary::from_labels(["Y", "Y", "X", "Y", "X"]);
        assert_eq!(a.count_of("X"), b.count_of("X"));
        assert_eq!(a.count_of("Y"), b.count_of("Y"));
        assert_eq!(a.render(), "2 Xs, 3 Ys");
        assert_eq!(b.render(), "3 Ys, 2 Xs");
    }
}
