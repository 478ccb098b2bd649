//! Pipeline settings: output location, overlay styling and report layout.

use super::errors::{ConfigError, ConfigValidator, ConfigValidatorExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest accepted label font size, in pixels.
pub const MAX_LABEL_FONT_SIZE: f32 = 512.0;

/// Styling for the annotated view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Outline width of the interactive rectangles, in figure pixels.
    pub stroke_width: f32,
    /// Outline thickness burned into the flattened raster, in pixels.
    pub raster_line_width: u32,
    /// Font size for the labels drawn on the flattened raster.
    pub label_font_size: f32,
    /// Font used for raster labels. When unset, system fonts are probed and
    /// labels are skipped if none loads.
    pub font_path: Option<PathBuf>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            raster_line_width: 2,
            label_font_size: 16.0,
            font_path: None,
        }
    }
}

impl ConfigValidator for ViewConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_positive_f32(self.stroke_width, "view.stroke_width")?;
        self.validate_positive_f32(self.label_font_size, "view.label_font_size")?;
        if self.label_font_size > MAX_LABEL_FONT_SIZE {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "view.label_font_size must be at most {MAX_LABEL_FONT_SIZE}, got {}",
                    self.label_font_size
                ),
            });
        }
        if self.raster_line_width == 0 {
            return Err(ConfigError::InvalidConfig {
                message: "view.raster_line_width must be greater than 0".to_string(),
            });
        }
        self.validate_optional_file(self.font_path.as_deref())
    }
}

/// Fixed layout of the PDF report. Lengths are millimetres on an A4 page,
/// measured from the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    pub title: String,
    /// Font size in points.
    pub font_size: f32,
    pub left_margin_mm: f32,
    pub top_margin_mm: f32,
    pub cell_width_mm: f32,
    pub cell_height_mm: f32,
    pub image_x_mm: f32,
    pub image_y_mm: f32,
    /// Width of the embedded image; its height follows the aspect ratio.
    pub image_width_mm: f32,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            title: "Dental X-ray Analysis Report".to_string(),
            font_size: 12.0,
            left_margin_mm: 10.0,
            top_margin_mm: 10.0,
            cell_width_mm: 200.0,
            cell_height_mm: 10.0,
            image_x_mm: 10.0,
            image_y_mm: 50.0,
            image_width_mm: 80.0,
        }
    }
}

impl ConfigValidator for ReportLayout {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "report.title must not be empty".to_string(),
            });
        }
        self.validate_positive_f32(self.font_size, "report.font_size")?;
        self.validate_non_negative_f32(self.left_margin_mm, "report.left_margin_mm")?;
        self.validate_non_negative_f32(self.top_margin_mm, "report.top_margin_mm")?;
        self.validate_positive_f32(self.cell_width_mm, "report.cell_width_mm")?;
        self.validate_positive_f32(self.cell_height_mm, "report.cell_height_mm")?;
        self.validate_non_negative_f32(self.image_x_mm, "report.image_x_mm")?;
        self.validate_non_negative_f32(self.image_y_mm, "report.image_y_mm")?;
        self.validate_positive_f32(self.image_width_mm, "report.image_width_mm")
    }
}

/// Top-level configuration for [`ReportPipeline`](crate::pipeline::ReportPipeline).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use dental_xray_report::core::config::PipelineConfig;
///
/// let config: PipelineConfig =
///     serde_json::from_str(r#"{ "report": { "title": "Panoramic Review" } }"#).unwrap();
/// assert_eq!(config.report.title, "Panoramic Review");
/// assert_eq!(config.view.stroke_width, 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory shared by all requests for their artifacts. Defaults to the
    /// OS temporary directory.
    pub output_dir: Option<PathBuf>,
    pub view: ViewConfig,
    pub report: ReportLayout,
}

impl PipelineConfig {
    /// Loads and validates a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str::<Self>(&raw)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
            .validated()?;
        debug!("Loaded pipeline configuration from {}", path.display());
        Ok(config)
    }

    /// Sets the artifact directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// The directory artifacts are written to.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

impl ConfigValidator for PipelineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.view.validate()?;
        self.report.validate()
    }
}
