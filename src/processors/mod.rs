//! Detection post-processing.
//!
//! This module turns raw detector output into the pieces the view builder and
//! the report composer consume.
//!
//! # Modules
//!
//! * `geometry` - Points and axis-aligned bounding boxes
//! * `normalize` - Raw detector output to ordered [`Detection`](crate::domain::Detection)s
//! * `color` - Request-scoped class color assignment
//! * `summary` - Per-label counts and the rendered issue summary

pub mod color;
mod geometry;
pub mod normalize;
pub mod summary;

pub use color::{Color, ColorRegistry, PALETTE};
pub use geometry::*;
pub use normalize::normalize;
pub use summary::{IssueSummary, NO_ISSUES};
