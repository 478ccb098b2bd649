//! Utility functions for the report pipeline.
//!
//! This module provides image loading and encoding, the annotated view and
//! its raster rendering, and the interactive figure export.

pub mod figure;
pub mod image;
pub mod visualization;

pub use figure::Figure;
pub use self::image::{encode_png, load_image, load_image_from_memory, save_png_artifact};
pub use visualization::{AnnotatedView, Overlay, RasterStyle, load_label_font, render_flattened};

pub use crate::core::init_tracing;
