//! Detector implementations.
//!
//! The object detector itself is an external collaborator reached through
//! the [`Detector`](crate::core::Detector) trait. This module holds the
//! implementations shipped with the crate.

pub mod precomputed;

pub use precomputed::PrecomputedDetector;
