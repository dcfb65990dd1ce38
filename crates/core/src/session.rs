//! The patient session: one patient aggregate, one form, one directory.
//!
//! The session owns the aggregate exclusively and hands it out read-only.
//! Fetches carry a generation ticket so a late-arriving response for a
//! superseded fetch is discarded rather than applied; submissions are
//! serialized by the form state machine. There is no true parallelism here,
//! correctness rests on the state machine excluding invalid transitions.

use medview_records::{Diagnosis, DiagnosisDirectory, EntryType, PatientAggregate, RecordError};

use crate::api::{ApiError, PatientApi};
use crate::form::{EntryForm, FormError};
use crate::view::PatientView;

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no patient loaded")]
    NoPatient,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Proof of which fetch generation a response belongs to.
///
/// Issued by [`PatientSession::begin_fetch`]; a ticket older than the latest
/// one marks its response as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// A viewer/editor session for one patient at a time.
pub struct PatientSession<A: PatientApi> {
    api: A,
    directory: DiagnosisDirectory,
    patient: Option<PatientAggregate>,
    form: EntryForm,
    fetch_generation: u64,
}

impl<A: PatientApi> PatientSession<A> {
    /// Creates a session with an empty diagnosis directory; call
    /// [`load_directory`](Self::load_directory) or
    /// [`use_bundled_directory`](Self::use_bundled_directory) to populate it.
    pub fn new(api: A) -> Self {
        Self {
            api,
            directory: DiagnosisDirectory::empty(),
            patient: None,
            form: EntryForm::new(),
            fetch_generation: 0,
        }
    }

    pub fn directory(&self) -> &DiagnosisDirectory {
        &self.directory
    }

    /// The loaded aggregate, if any. Read-only; the session owns it.
    pub fn patient(&self) -> Option<&PatientAggregate> {
        self.patient.as_ref()
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    /// Forwards one field edit to the form.
    pub fn edit_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.form.edit_field(name, value)
    }

    /// Forwards the type selection to the form.
    pub fn select_entry_type(&mut self, entry_type: EntryType) -> Result<(), FormError> {
        self.form.select_type(entry_type)
    }

    /// Fetches the diagnosis list and replaces the directory.
    ///
    /// On failure the directory degrades to empty: every lookup reports
    /// not-found and display falls back to placeholders, it never fails.
    pub async fn load_directory(&mut self) {
        match self.api.fetch_diagnoses().await {
            Ok(list) => self.set_directory(list),
            Err(err) => {
                tracing::warn!("diagnosis list unavailable, serving empty directory: {err}");
                self.directory = DiagnosisDirectory::empty();
            }
        }
    }

    /// Replaces the directory with the bundled list.
    pub fn use_bundled_directory(&mut self) -> Result<(), RecordError> {
        self.directory = DiagnosisDirectory::bundled()?;
        Ok(())
    }

    /// Replaces the directory from an already-fetched list.
    pub fn set_directory(&mut self, entries: Vec<Diagnosis>) {
        self.directory = DiagnosisDirectory::from_entries(entries);
    }

    /// Starts a new fetch generation, superseding any fetch still in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        FetchTicket {
            generation: self.fetch_generation,
        }
    }

    /// Applies a fetch outcome, unless the ticket has been superseded.
    ///
    /// Returns `Ok(true)` when the aggregate was replaced, `Ok(false)` when
    /// the response was stale and discarded. A fresh failure clears the
    /// aggregate (the view suppresses rendering) and is passed to the caller.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<PatientAggregate, ApiError>,
    ) -> Result<bool, ApiError> {
        if ticket.generation != self.fetch_generation {
            tracing::debug!(
                "discarding stale fetch response (generation {} < {})",
                ticket.generation,
                self.fetch_generation
            );
            return Ok(false);
        }
        match outcome {
            Ok(aggregate) => {
                self.patient = Some(aggregate);
                Ok(true)
            }
            Err(err) => {
                self.patient = None;
                Err(err)
            }
        }
    }

    /// Fetches a patient by identifier and replaces the aggregate.
    pub async fn load(&mut self, id: &str) -> Result<(), ApiError> {
        let ticket = self.begin_fetch();
        let outcome = self.api.fetch_patient(id).await;
        self.apply_fetch(ticket, outcome)?;
        Ok(())
    }

    /// Validates the draft and submits it as a new entry for the loaded
    /// patient.
    ///
    /// On success the server's returned aggregate replaces the local one
    /// (last-write-wins) and the draft is cleared. On failure the draft and
    /// the aggregate are left untouched, and the error is surfaced.
    pub async fn submit_entry(&mut self) -> Result<(), SessionError> {
        let patient_id = self
            .patient
            .as_ref()
            .map(|p| p.id.clone())
            .ok_or(SessionError::NoPatient)?;

        let payload = self.form.begin_submit()?;

        match self.api.submit_entry(&patient_id, &payload).await {
            Ok(aggregate) => {
                self.form.finish_submit(true);
                self.patient = Some(aggregate);
                Ok(())
            }
            Err(err) => {
                self.form.finish_submit(false);
                Err(err.into())
            }
        }
    }

    /// The display representation of the loaded patient; `None` until a
    /// fetch has succeeded (a failed fetch suppresses rendering).
    pub fn view(&self) -> Option<PatientView> {
        self.patient
            .as_ref()
            .map(|aggregate| PatientView::build(aggregate, &self.directory))
    }
}
