//! Domain-level structures shared across the report pipeline.
//!
//! This module groups the detection records produced at the model boundary
//! and the patient identifier that keys every generated artifact.

pub mod detection;
pub mod patient;

pub use detection::{Detection, RawDetections};
pub use patient::{MAX_PATIENT_ID_LEN, PatientId};
