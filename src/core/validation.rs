//! Input validation utilities.
//!
//! Checks on detector output report [`ReportError::MalformedDetectionOutput`];
//! checks on caller input report [`ReportError::InvalidInput`].

use crate::core::errors::ReportError;

/// Validates that a float value is finite (not NaN or infinite).
#[inline]
pub fn validate_finite(value: f32, param_name: &str) -> Result<(), ReportError> {
    if !value.is_finite() {
        return Err(ReportError::malformed(format!(
            "'{param_name}' must be finite, got: {value}"
        )));
    }
    Ok(())
}

/// Validates that a score lies in `[0, 1]`.
#[inline]
pub fn validate_unit_interval(value: f32, param_name: &str) -> Result<(), ReportError> {
    validate_finite(value, param_name)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ReportError::malformed(format!(
            "'{param_name}' must be in range [0, 1], got: {value}"
        )));
    }
    Ok(())
}

/// Validates that two parallel sequences have the same length.
#[inline]
pub fn validate_same_length<T, U>(
    items1: &[T],
    items2: &[U],
    name1: &str,
    name2: &str,
) -> Result<(), ReportError> {
    if items1.len() != items2.len() {
        return Err(ReportError::malformed(format!(
            "Length mismatch: {} has {} elements, but {} has {} elements",
            name1,
            items1.len(),
            name2,
            items2.len()
        )));
    }
    Ok(())
}

/// Validates the dimensions of an input image.
pub fn validate_image_dimensions(width: u32, height: u32, context: &str) -> Result<(), ReportError> {
    if height == 0 || width == 0 {
        return Err(ReportError::invalid_input(format!(
            "{context}: image dimensions must be positive, got {width}x{height}"
        )));
    }

    const MAX_DIMENSION: u32 = 32768;
    if height > MAX_DIMENSION || width > MAX_DIMENSION {
        return Err(ReportError::invalid_input(format!(
            "{context}: image dimensions exceed maximum of {MAX_DIMENSION}x{MAX_DIMENSION}, got {width}x{height}"
        )));
    }

    Ok(())
}
