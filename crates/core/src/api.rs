//! The seam behind which the external patient-record API lives.
//!
//! Everything the session needs from the collaborator is expressed here;
//! transport (reqwest) is implemented in `medview-api-client`, and tests use
//! in-memory implementations.

use std::future::Future;

use medview_records::{Diagnosis, EntryData, PatientAggregate, RecordError};

/// Errors from talking to the patient-record API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested patient does not exist (HTTP 404).
    #[error("patient not found")]
    NotFound,

    /// The request itself failed (connection, timeout, malformed response).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status other than 404.
    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not decode into the expected shape.
    #[error(transparent)]
    Decode(#[from] RecordError),
}

/// Operations the external REST collaborator exposes.
///
/// Submitting returns the updated aggregate: the server is authoritative, and
/// the caller replaces its local state with the response (last-write-wins).
pub trait PatientApi {
    /// `GET /patients/{id}`.
    fn fetch_patient(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<PatientAggregate, ApiError>> + Send;

    /// `POST /patients/{id}/entries` with one entry variant as body.
    fn submit_entry(
        &self,
        patient_id: &str,
        entry: &EntryData,
    ) -> impl Future<Output = Result<PatientAggregate, ApiError>> + Send;

    /// `GET /diagnoses`.
    fn fetch_diagnoses(&self) -> impl Future<Output = Result<Vec<Diagnosis>, ApiError>> + Send;
}
