//! Trait definitions at the pipeline's external seams.

pub mod detector;

pub use detector::{Detector, DetectorError};
