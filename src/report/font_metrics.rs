//! Glyph widths of the standard Helvetica font, used to center text cells.

/// Advance widths (1/1000 em) for the printable ASCII range `' '..='~'`.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Fallback width for characters outside the table.
const DEFAULT_WIDTH: u16 = 556;

/// Width of `text` in points when set in Helvetica at `font_size` points.
pub fn helvetica_text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|ch| {
            let code = ch as u32;
            if (0x20..=0x7E).contains(&code) {
                HELVETICA_WIDTHS[(code - 0x20) as usize] as u32
            } else {
                DEFAULT_WIDTH as u32
            }
        })
        .sum();
    units as f32 * font_size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(helvetica_text_width(" ", 1000.0), 278.0);
        assert_eq!(helvetica_text_width("A", 1000.0), 667.0);
        assert_eq!(helvetica_text_width("i", 1000.0), 222.0);
        assert_eq!(helvetica_text_width("~", 1000.0), 584.0);
        assert_eq!(helvetica_text_width("@", 1000.0), 1015.0);
    }

    #[test]
    fn test_scales_with_font_size() {
        let w12 = helvetica_text_width("Patient ID", 12.0);
        let w24 = helvetica_text_width("Patient ID", 24.0);
        assert!((w24 - 2.0 * w12).abs() < 1e-4);
        assert_eq!(helvetica_text_width("", 12.0), 0.0);
    }
}
