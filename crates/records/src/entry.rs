//! The closed, tag-discriminated entry model.
//!
//! An entry is one discrete medical-record event belonging to a patient. The
//! variant set is closed: `HealthCheck`, `Hospital` and
//! `OccupationalHealthcare`, discriminated on the wire by the `type` field.
//! In-language exhaustiveness is enforced by the compiler through the
//! [`EntryData`] enum; the one place a foreign tag can still appear is raw
//! wire data, which is guarded by [`Entry::narrow`].

use chrono::NaiveDate;
use medview_types::{DiagnosisCode, NonEmptyText};
use serde::{Deserialize, Serialize};

use crate::{RecordError, RecordResult};

/// Discriminator identifying which entry variant a value is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryType {
    HealthCheck,
    Hospital,
    OccupationalHealthcare,
}

impl EntryType {
    /// Convert to the wire discriminator string.
    pub fn to_wire(self) -> &'static str {
        match self {
            EntryType::HealthCheck => "HealthCheck",
            EntryType::Hospital => "Hospital",
            EntryType::OccupationalHealthcare => "OccupationalHealthcare",
        }
    }

    /// Parse from the wire discriminator string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "HealthCheck" => Some(EntryType::HealthCheck),
            "Hospital" => Some(EntryType::Hospital),
            "OccupationalHealthcare" => Some(EntryType::OccupationalHealthcare),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_wire())
    }
}

/// Health check outcome, ordinal 0 (healthy) to 3 (critical risk).
///
/// Transmitted on the wire as its integer ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    /// Parse from the integer ordinal; `None` outside 0-3.
    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            0 => Some(HealthCheckRating::Healthy),
            1 => Some(HealthCheckRating::LowRisk),
            2 => Some(HealthCheckRating::HighRisk),
            3 => Some(HealthCheckRating::CriticalRisk),
            _ => None,
        }
    }

    /// The wire ordinal.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            HealthCheckRating::Healthy => "Healthy",
            HealthCheckRating::LowRisk => "Low risk",
            HealthCheckRating::HighRisk => "High risk",
            HealthCheckRating::CriticalRisk => "Critical risk",
        }
    }
}

impl Serialize for HealthCheckRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.ordinal())
    }
}

impl<'de> Deserialize<'de> for HealthCheckRating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        HealthCheckRating::from_ordinal(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "health check rating must be between 0 and 3, got {value}"
            ))
        })
    }
}

/// Fields shared by every entry variant.
///
/// Diagnosis codes are weak references into the diagnosis directory: order is
/// preserved, duplicates and unknown codes are permitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryBase {
    pub description: NonEmptyText,

    /// Calendar date of the event (ISO `YYYY-MM-DD` on the wire).
    pub date: NaiveDate,

    pub specialist: NonEmptyText,

    #[serde(
        rename = "diagnosisCodes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub diagnosis_codes: Vec<DiagnosisCode>,
}

/// Hospital discharge details.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Discharge {
    pub date: NaiveDate,

    /// May be empty; an explicit documented leniency of the entry contract.
    pub criteria: String,
}

/// Sick-leave interval; `start_date <= end_date` is enforced at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SickLeave {
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,

    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
}

/// A health check visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckEntry {
    #[serde(flatten)]
    pub base: EntryBase,

    #[serde(rename = "healthCheckRating")]
    pub health_check_rating: HealthCheckRating,
}

/// A hospital visit with discharge details.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HospitalEntry {
    #[serde(flatten)]
    pub base: EntryBase,

    pub discharge: Discharge,
}

/// An occupational healthcare visit on behalf of an employer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OccupationalHealthcareEntry {
    #[serde(flatten)]
    pub base: EntryBase,

    #[serde(rename = "employerName")]
    pub employer_name: NonEmptyText,

    #[serde(rename = "sickLeave", skip_serializing_if = "Option::is_none")]
    pub sick_leave: Option<SickLeave>,
}

/// Entry payload without a server-assigned id.
///
/// This is what validation produces from a draft and what `POST
/// /patients/{id}/entries` carries. Any match on this enum is exhaustive by
/// construction; a fourth variant cannot exist in the type system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryData {
    HealthCheck(HealthCheckEntry),
    Hospital(HospitalEntry),
    OccupationalHealthcare(OccupationalHealthcareEntry),
}

impl EntryData {
    /// The discriminator for this payload.
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryData::HealthCheck(_) => EntryType::HealthCheck,
            EntryData::Hospital(_) => EntryType::Hospital,
            EntryData::OccupationalHealthcare(_) => EntryType::OccupationalHealthcare,
        }
    }

    /// The shared base fields, whichever the variant.
    pub fn base(&self) -> &EntryBase {
        match self {
            EntryData::HealthCheck(e) => &e.base,
            EntryData::Hospital(e) => &e.base,
            EntryData::OccupationalHealthcare(e) => &e.base,
        }
    }
}

/// One medical-record event, as owned by a patient.
///
/// The id is server-assigned; clients never construct an `Entry` except by
/// narrowing wire data the server returned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,

    #[serde(flatten)]
    pub data: EntryData,
}

impl Entry {
    /// Narrows a raw wire value into an [`Entry`], guarding the closed
    /// variant set.
    ///
    /// The `type` tag is matched against exactly the three known
    /// discriminators first, so a foreign tag is reported as
    /// [`RecordError::UnreachableVariant`] rather than a generic schema
    /// error. Schema mismatches within a known variant become
    /// [`RecordError::Translation`].
    pub fn narrow(value: &serde_json::Value) -> RecordResult<Self> {
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| RecordError::UnreachableVariant("<missing type>".into()))?;

        if EntryType::from_wire(tag).is_none() {
            return Err(RecordError::UnreachableVariant(tag.to_owned()));
        }

        serde_json::from_value(value.clone())
            .map_err(|e| RecordError::Translation(format!("entry schema mismatch: {e}")))
    }
}
