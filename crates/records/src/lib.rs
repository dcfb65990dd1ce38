//! Wire/boundary support for MedView patient records.
//!
//! This crate provides **wire models** and **translation helpers** for the
//! record shapes exchanged with the patient-record API:
//! - the diagnosis reference list and its read-only directory
//! - the patient aggregate (demographics plus owned entries)
//! - the closed, tag-discriminated entry model
//!
//! It also owns the parts of the record lifecycle that are pure data work:
//! - narrowing raw draft input into exactly one valid entry variant
//! - rendering an entry into its display fields
//!
//! Transport (HTTP) and session state belong to other crates; nothing here
//! performs I/O.

pub mod diagnosis;
pub mod draft;
pub mod entry;
pub mod patient;
pub mod render;
pub mod validation;

// Re-export facades
pub use diagnosis::{Diagnosis, DiagnosisDirectory};
pub use draft::{EntryDraft, FieldError};
pub use entry::{
    Discharge, Entry, EntryBase, EntryData, EntryType, HealthCheckEntry, HealthCheckRating,
    HospitalEntry, OccupationalHealthcareEntry, SickLeave,
};
pub use patient::{EntryDefect, Gender, Patient, PatientAggregate};
pub use render::{render, DiagnosisLine, EntryDetails, EntryView};
pub use validation::{build_entry, ValidationError};

/// Errors returned by the `medview-records` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("unreachable entry variant '{0}'")]
    UnreachableVariant(String),
}

/// Type alias for Results that can fail with a [`RecordError`].
pub type RecordResult<T> = Result<T, RecordError>;
