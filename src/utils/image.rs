//! Utility functions for image loading and encoding.

use crate::core::errors::{ArtifactKind, ReportError, ReportResult};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Converts a DynamicImage to an RgbImage.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// # Errors
///
/// Returns [`ReportError::ImageLoad`] if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> ReportResult<RgbImage> {
    let img = image::open(path).map_err(ReportError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

/// Decodes an in-memory image, e.g. an upload, to RgbImage.
pub fn load_image_from_memory(bytes: &[u8]) -> ReportResult<RgbImage> {
    let img = image::load_from_memory(bytes).map_err(ReportError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

/// Encodes an image as PNG into memory.
pub fn encode_png(img: &RgbImage) -> ReportResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ReportError::image_encode("Failed to encode PNG", e))?;
    Ok(buffer.into_inner())
}

/// Writes an image artifact as PNG, replacing any existing file.
///
/// # Errors
///
/// Returns [`ReportError::ReportWriteError`] if the location is not writable.
pub fn save_png_artifact(img: &RgbImage, path: &Path, artifact: ArtifactKind) -> ReportResult<()> {
    let bytes = encode_png(img)?;
    std::fs::write(path, bytes).map_err(|e| ReportError::write_failed(artifact, path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_encode_and_reload() {
        let mut img = RgbImage::new(4, 3);
        img.put_pixel(1, 2, Rgb([10, 20, 30]));

        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = load_image_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(1, 2), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_load_image_missing_file() {
        assert!(matches!(
            load_image(Path::new("/no/such/xray.png")),
            Err(ReportError::ImageLoad(_))
        ));
    }

    #[test]
    fn test_save_png_artifact_unwritable_dir() {
        let img = RgbImage::new(2, 2);
        let err = save_png_artifact(
            &img,
            Path::new("/no/such/dir/x_pred.png"),
            ArtifactKind::AnnotatedImage,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ReportError::ReportWriteError {
                artifact: ArtifactKind::AnnotatedImage,
                ..
            }
        ));
    }

    #[test]
    fn test_save_png_artifact_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p_pred.png");
        save_png_artifact(&RgbImage::new(2, 2), &path, ArtifactKind::AnnotatedImage).unwrap();
        save_png_artifact(&RgbImage::new(5, 7), &path, ArtifactKind::AnnotatedImage).unwrap();
        assert_eq!(load_image(&path).unwrap().dimensions(), (5, 7));
    }
}
