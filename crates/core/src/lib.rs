//! # MedView Core
//!
//! Session and form logic for the MedView patient-record viewer/editor.
//!
//! This crate contains the pure state handling between the wire models
//! (`medview-records`) and a front end:
//! - the [`PatientApi`] seam behind which the external REST collaborator lives
//! - the entry form state machine (single in-flight submission)
//! - the patient session: fetch/replace of the aggregate with a stale-response
//!   guard, diagnosis-directory loading with graceful degradation, and view
//!   assembly
//!
//! **No transport concerns**: HTTP lives in `medview-api-client`; binaries
//! live in `medview-cli` and the dev server.

pub mod api;
pub mod form;
pub mod session;
pub mod view;

pub use api::{ApiError, PatientApi};
pub use form::{EntryForm, FormError, FormPhase};
pub use session::{FetchTicket, PatientSession, SessionError};
pub use view::PatientView;
