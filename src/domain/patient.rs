//! Patient identifiers and the artifact locations derived from them.
//!
//! An identifier is trimmed and must then consist of ASCII letters, digits,
//! `-` and `_`. The trimmed value is both what the report shows and what
//! names the files, so distinct identifiers never share an artifact.

use crate::core::errors::{ReportError, ReportResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Longest accepted identifier, in characters.
pub const MAX_PATIENT_ID_LEN: usize = 64;

const ANNOTATED_IMAGE_SUFFIX: &str = "_pred.png";
const REPORT_SUFFIX: &str = "_report.pdf";

/// A validated patient identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Validates a raw identifier as typed by the operator.
    pub fn parse(raw: &str) -> ReportResult<Self> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(ReportError::invalid_input(
                "Patient ID is required to generate the report",
            ));
        }

        if id.chars().count() > MAX_PATIENT_ID_LEN {
            return Err(ReportError::invalid_input(format!(
                "Patient ID must be at most {MAX_PATIENT_ID_LEN} characters"
            )));
        }

        if id.chars().any(char::is_whitespace) {
            return Err(ReportError::invalid_input(
                "Patient ID must not contain spaces; use '-' or '_' instead",
            ));
        }

        if let Some(bad) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ReportError::invalid_input(format!(
                "Patient ID contains unsupported character '{bad}'; use letters, digits, '-' or '_'"
            )));
        }

        Ok(Self(id.to_string()))
    }

    /// The trimmed identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{dir}/{id}_pred.png`
    pub fn annotated_image_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{ANNOTATED_IMAGE_SUFFIX}", self.0))
    }

    /// `{dir}/{id}_report.pdf`
    pub fn report_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{REPORT_SUFFIX}", self.0))
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let id = PatientId::parse("  P-001 \n").unwrap();
        assert_eq!(id.as_str(), "P-001");
    }

    #[test]
    fn test_empty_and_whitespace_rejected() {
        for raw in ["", "   ", "\t\n"] {
            assert!(matches!(
                PatientId::parse(raw),
                Err(ReportError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_internal_whitespace_rejected() {
        for raw in ["Jane Doe", "Jane  Doe 42", "P-\t001"] {
            assert!(
                matches!(PatientId::parse(raw), Err(ReportError::InvalidInput { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_distinct_ids_get_distinct_artifacts() {
        let dir = Path::new("/tmp/reports");
        let ids = ["Jane_Doe", "Jane-Doe", "JaneDoe", "jane_doe", "P-001", "P_001"];
        let reports: std::collections::HashSet<PathBuf> = ids
            .iter()
            .map(|raw| PatientId::parse(raw).unwrap().report_path(dir))
            .collect();
        let images: std::collections::HashSet<PathBuf> = ids
            .iter()
            .map(|raw| PatientId::parse(raw).unwrap().annotated_image_path(dir))
            .collect();
        assert_eq!(reports.len(), ids.len());
        assert_eq!(images.len(), ids.len());
    }

    #[test]
    fn test_path_characters_rejected() {
        for raw in ["../etc/passwd", "a/b", "C:\\x", "P.001", "naïve"] {
            assert!(
                matches!(PatientId::parse(raw), Err(ReportError::InvalidInput { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_length_limit() {
        assert!(PatientId::parse(&"a".repeat(MAX_PATIENT_ID_LEN)).is_ok());
        assert!(PatientId::parse(&"a".repeat(MAX_PATIENT_ID_LEN + 1)).is_err());
    }

    #[test]
    fn test_artifact_paths_depend_only_on_id() {
        let dir = Path::new("/tmp/reports");
        let a = PatientId::parse("12345").unwrap();
        let b = PatientId::parse(" 12345 ").unwrap();
        assert_eq!(a.report_path(dir), PathBuf::from("/tmp/reports/12345_report.pdf"));
        assert_eq!(
            a.annotated_image_path(dir),
            PathBuf::from("/tmp/reports/12345_pred.png")
        );
        assert_eq!(a.report_path(dir), b.report_path(dir));
    }
}
