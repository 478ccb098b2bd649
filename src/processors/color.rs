//! Per-request class color assignment.

use image::Rgb;
use std::collections::HashMap;
use std::fmt;

/// A display color, kept both as CSS hex and as raster RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    hex: &'static str,
    rgb: [u8; 3],
}

impl Color {
    const fn new(hex: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self { hex, rgb: [r, g, b] }
    }

    /// CSS hex form, e.g. `#FF0000`.
    pub fn hex(&self) -> &'static str {
        self.hex
    }

    pub fn rgb(&self) -> Rgb<u8> {
        Rgb(self.rgb)
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn contrasting_text(&self) -> Rgb<u8> {
        let [r, g, b] = self.rgb;
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        if luma > 140.0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex)
    }
}

/// The fixed, ordered display palette.
pub const PALETTE: [Color; 10] = [
    Color::new("#FF0000", 255, 0, 0),
    Color::new("#00FF00", 0, 255, 0),
    Color::new("#0000FF", 0, 0, 255),
    Color::new("#FFA500", 255, 165, 0),
    Color::new("#800080", 128, 0, 128),
    Color::new("#00FFFF", 0, 255, 255),
    Color::new("#FFC0CB", 255, 192, 203),
    Color::new("#A52A2A", 165, 42, 42),
    Color::new("#808000", 128, 128, 0),
    Color::new("#008080", 0, 128, 128),
];

/// Assigns colors to class ids in first-seen order.
///
/// The n-th distinct class gets `PALETTE[n % PALETTE.len()]`, so colors start
/// repeating once more than ten classes appear in one request. A registry
/// lives for exactly one request.
#[derive(Debug, Default)]
pub struct ColorRegistry {
    assigned: HashMap<u32, Color>,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color for `class_id`, assigning the next palette entry on
    /// first use.
    pub fn color_for(&mut self, class_id: u32) -> Color {
        let next = PALETTE[self.assigned.len() % PALETTE.len()];
        *self.assigned.entry(class_id).or_insert(next)
    }

    /// Number of distinct classes seen so far.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
