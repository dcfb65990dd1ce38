//! HTTP implementation of the [`PatientApi`] seam.
//!
//! A thin reqwest client against the REST collaborator. Status mapping:
//! 404 becomes [`ApiError::NotFound`], any other non-2xx becomes
//! [`ApiError::Rejected`] with the response body as message, transport
//! failures become [`ApiError::Network`]. Successful bodies go through the
//! `medview-records` parsers, so schema mismatches surface as
//! [`ApiError::Decode`].

use medview_core::{ApiError, PatientApi};
use medview_records::{Diagnosis, DiagnosisDirectory, EntryData, Patient, PatientAggregate};
use reqwest::StatusCode;

/// Default base URL, matching the dev server's default bind address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "MEDVIEW_API_URL";

/// reqwest-backed client for the patient-record REST API.
#[derive(Clone, Debug)]
pub struct RestClient {
    base_url: String,
    http: reqwest::Client,
}

impl RestClient {
    /// Creates a client for the given base URL (trailing slashes are
    /// tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client from `MEDVIEW_API_URL`, falling back to the default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reads the response off the wire, mapping the status before touching
    /// the body.
    async fn checked_body(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let url = response.url().clone();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("{url} answered 404, mapping to not-found");
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!("{url} rejected the request with {status}: {message}");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        response.text().await.map_err(network)
    }
}

fn network(err: reqwest::Error) -> ApiError {
    tracing::debug!("transport failure: {err}");
    ApiError::Network(err.to_string())
}

impl PatientApi for RestClient {
    async fn fetch_patient(&self, id: &str) -> Result<PatientAggregate, ApiError> {
        let url = format!("{}/patients/{}", self.base_url, id);
        let response = self.http.get(&url).send().await.map_err(network)?;
        let body = Self::checked_body(response).await?;
        Ok(Patient::parse(&body)?)
    }

    async fn submit_entry(
        &self,
        patient_id: &str,
        entry: &EntryData,
    ) -> Result<PatientAggregate, ApiError> {
        let url = format!("{}/patients/{}/entries", self.base_url, patient_id);
        let response = self
            .http
            .post(&url)
            .json(entry)
            .send()
            .await
            .map_err(network)?;
        let body = Self::checked_body(response).await?;
        Ok(Patient::parse(&body)?)
    }

    async fn fetch_diagnoses(&self) -> Result<Vec<Diagnosis>, ApiError> {
        let url = format!("{}/diagnoses", self.base_url);
        let response = self.http.get(&url).send().await.map_err(network)?;
        let body = Self::checked_body(response).await?;
        Ok(DiagnosisDirectory::parse_list(&body)?)
    }
}
