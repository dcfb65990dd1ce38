//! Diagnosis reference data and the read-only lookup directory.
//!
//! Diagnosis codes on entries are weak references: they are resolved against
//! the directory for display, but an entry stays valid when a code is
//! unknown. Lookup therefore never fails; callers get `None` and degrade to a
//! placeholder.

use std::collections::BTreeMap;

use medview_types::DiagnosisCode;
use serde::{Deserialize, Serialize};

use crate::{RecordError, RecordResult};

/// Diagnosis list bundled into the binary, used when no remote list is
/// available. Same shape as `GET /diagnoses`.
const BUNDLED_DIAGNOSES: &str = include_str!("../data/diagnoses.json");

/// One diagnosis in the reference list.
///
/// Immutable reference data: created at load time, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Diagnosis {
    /// Code uniquely identifying the diagnosis (for example "M24.2").
    pub code: DiagnosisCode,

    /// Human-readable name.
    pub name: String,

    /// Latin name, where the terminology provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

/// Read-only mapping from diagnosis code to [`Diagnosis`].
///
/// The directory is built once per session, either from a fetched remote list
/// or from the bundled list; both feed the same constructor. There is no
/// invalidation. When the remote fetch fails the session serves the empty
/// directory and every lookup reports not-found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosisDirectory {
    by_code: BTreeMap<String, Diagnosis>,
}

impl DiagnosisDirectory {
    /// Directory with no known codes; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a directory from a list of diagnoses.
    ///
    /// Later duplicates of a code replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = Diagnosis>) -> Self {
        let by_code = entries
            .into_iter()
            .map(|d| (d.code.as_str().to_owned(), d))
            .collect();
        Self { by_code }
    }

    /// Builds the directory from the bundled diagnosis list.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidJson`] if the embedded list does not
    /// parse; that indicates a build defect, not a runtime condition.
    pub fn bundled() -> RecordResult<Self> {
        Ok(Self::from_entries(Self::bundled_entries()?))
    }

    /// The bundled diagnosis list as plain entries (what `GET /diagnoses`
    /// would serve when backed by the bundled data).
    pub fn bundled_entries() -> RecordResult<Vec<Diagnosis>> {
        serde_json::from_str(BUNDLED_DIAGNOSES).map_err(RecordError::InvalidJson)
    }

    /// Parses a JSON diagnosis list (the `GET /diagnoses` response body).
    pub fn parse_list(json_text: &str) -> RecordResult<Vec<Diagnosis>> {
        serde_json::from_str(json_text).map_err(RecordError::InvalidJson)
    }

    /// Looks up a diagnosis by code.
    ///
    /// Returns `None` for unknown codes; never fails.
    pub fn lookup(&self, code: &str) -> Option<&Diagnosis> {
        self.by_code.get(code)
    }

    /// Number of known codes.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// True when the directory knows no codes at all.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(code: &str, name: &str) -> Diagnosis {
        Diagnosis {
            code: DiagnosisCode::new(code).expect("valid code"),
            name: name.to_owned(),
            latin: None,
        }
    }

    #[test]
    fn lookup_finds_known_code() {
        let directory =
            DiagnosisDirectory::from_entries([sample("M24.2", "Disorder of ligament")]);
        let found = directory.lookup("M24.2").expect("known code");
        assert_eq!(found.name, "Disorder of ligament");
    }

    #[test]
    fn lookup_misses_without_failing() {
        let directory = DiagnosisDirectory::empty();
        assert!(directory.lookup("Z99.9").is_none());
    }

    #[test]
    fn bundled_list_parses_and_is_non_empty() {
        let directory = DiagnosisDirectory::bundled().expect("bundled list parses");
        assert!(!directory.is_empty());
        assert!(directory.lookup("J06.9").is_some());
    }

    #[test]
    fn later_duplicate_code_wins() {
        let directory = DiagnosisDirectory::from_entries([
            sample("L20", "first"),
            sample("L20", "second"),
        ]);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.lookup("L20").expect("known").name, "second");
    }

    #[test]
    fn diagnosis_wire_shape() {
        let json = r#"{ "code": "Z57.1", "name": "Occupational exposure to radiation" }"#;
        let diagnosis: Diagnosis = serde_json::from_str(json).expect("valid diagnosis");
        assert_eq!(diagnosis.code.as_str(), "Z57.1");
        assert!(diagnosis.latin.is_none());
    }
}
