//! Patient aggregate wire model and translation helpers.
//!
//! The aggregate is the unit fetched from and returned by the API: a
//! patient's demographics together with the ordered entries the patient owns.
//! Entries are narrowed one at a time so that a single defective entry (an
//! unknown discriminator, or a schema mismatch) degrades to a recorded defect
//! instead of making the whole patient unviewable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::{RecordError, RecordResult};

/// Administrative gender of a patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// An entry that failed wire narrowing, kept alongside the aggregate so the
/// view can report it without losing the remaining entries.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryDefect {
    /// Zero-based position of the entry in the server's list.
    pub position: usize,

    /// Why the entry was rejected.
    pub reason: String,
}

/// A patient together with the ordered entries the patient owns.
///
/// Order is insertion/display order; nothing else is read into it.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientAggregate {
    pub id: String,
    pub name: String,
    pub occupation: String,
    pub gender: Gender,
    pub ssn: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub entries: Vec<Entry>,
    pub defects: Vec<EntryDefect>,
}

/// Patient resource operations.
///
/// Zero-sized namespacing type; all methods are associated functions.
pub struct Patient;

impl Patient {
    /// Parse a patient aggregate from JSON text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path"
    /// (e.g. `entries.2.date`) to the failing field when the JSON does not
    /// match the wire schema.
    ///
    /// Entries are narrowed individually through [`Entry::narrow`]; an entry
    /// that fails becomes an [`EntryDefect`] on the aggregate rather than a
    /// parse failure.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the JSON does not represent a patient
    /// aggregate (wrong shape, unknown keys, invalid gender).
    pub fn parse(json_text: &str) -> RecordResult<PatientAggregate> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let wire = match serde_path_to_error::deserialize::<_, PatientWire>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(RecordError::Translation(format!(
                    "patient schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a patient aggregate.
///
/// Entries stay raw here so they can be narrowed one by one with per-entry
/// failure isolation (`deny_unknown_fields` is applied at this level; entry
/// objects use `flatten` and cannot carry it).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct PatientWire {
    pub id: String,

    pub name: String,

    pub occupation: String,

    pub gender: Gender,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,

    #[serde(rename = "dateOfBirth", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<serde_json::Value>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Convert wire format to the domain aggregate.
fn wire_to_domain(wire: PatientWire) -> RecordResult<PatientAggregate> {
    if wire.id.trim().is_empty() {
        return Err(RecordError::InvalidInput("patient id cannot be empty".into()));
    }

    // Lenient like other optional demographics: a malformed date of birth is
    // dropped rather than making the patient unviewable.
    let date_of_birth = wire
        .date_of_birth
        .as_deref()
        .and_then(|s| s.parse::<NaiveDate>().ok());

    let mut entries = Vec::with_capacity(wire.entries.len());
    let mut defects = Vec::new();
    for (position, raw) in wire.entries.iter().enumerate() {
        match Entry::narrow(raw) {
            Ok(entry) => entries.push(entry),
            Err(err) => defects.push(EntryDefect {
                position,
                reason: err.to_string(),
            }),
        }
    }

    Ok(PatientAggregate {
        id: wire.id,
        name: wire.name,
        occupation: wire.occupation,
        gender: wire.gender,
        ssn: wire.ssn,
        date_of_birth,
        entries,
        defects,
    })
}
