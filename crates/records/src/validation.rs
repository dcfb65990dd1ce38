//! Draft validation: narrowing raw field input into exactly one entry
//! variant.
//!
//! [`build_entry`] is a pure function. It either returns a fully valid
//! [`EntryData`] of exactly one variant or a [`ValidationError`]; it never
//! returns a variant with missing required fields.

use chrono::NaiveDate;
use medview_types::{DiagnosisCode, NonEmptyText};

use crate::draft::EntryDraft;
use crate::entry::{
    Discharge, EntryBase, EntryData, EntryType, HealthCheckEntry, HealthCheckRating,
    HospitalEntry, OccupationalHealthcareEntry, SickLeave,
};

/// Why a draft could not be narrowed into an entry.
///
/// Messages are surfaced to the user as a dismissible message, so they name
/// the offending field in form terms.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field '{field}' is missing or empty")]
    MissingRequiredField { field: &'static str },

    #[error("field '{field}' is not a valid calendar date (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str },

    #[error("health check rating must be a whole number between 0 and 3")]
    InvalidRating,

    #[error("employer name is required for an occupational healthcare entry")]
    MissingEmployer,

    #[error("sick leave needs both a start and an end date, with start not after end")]
    InvalidSickLeaveRange,

    #[error("no valid entry type selected")]
    UnknownEntryType,
}

/// Narrows a draft into a valid entry payload, or reports the first problem.
///
/// Checks run in a fixed order:
/// 1. shared fields (`description`, `date`, `specialist`), whichever variant
///    is selected;
/// 2. variant-specific fields, dispatched on the selected type;
/// 3. the diagnosis-code list (split on commas, order preserved, duplicates
///    kept, codes deliberately *not* checked against the directory).
pub fn build_entry(draft: &EntryDraft) -> Result<EntryData, ValidationError> {
    let description = required("description", &draft.description)?;
    let date = required("date", &draft.date).and_then(|_| parse_date("date", &draft.date))?;
    let specialist = required("specialist", &draft.specialist)?;

    let base = EntryBase {
        description,
        date,
        specialist,
        diagnosis_codes: split_codes(&draft.diagnosis_codes),
    };

    match draft.entry_type {
        Some(EntryType::HealthCheck) => {
            let health_check_rating = draft
                .health_check_rating
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(HealthCheckRating::from_ordinal)
                .ok_or(ValidationError::InvalidRating)?;
            Ok(EntryData::HealthCheck(HealthCheckEntry {
                base,
                health_check_rating,
            }))
        }
        Some(EntryType::Hospital) => {
            required("dischargeDate", &draft.discharge_date)?;
            let date = parse_date("dischargeDate", &draft.discharge_date)?;
            // Discharge criteria may be left blank; the fallback to an empty
            // string is an explicit part of the contract.
            let criteria = draft.discharge_criteria.trim().to_owned();
            Ok(EntryData::Hospital(HospitalEntry {
                base,
                discharge: Discharge { date, criteria },
            }))
        }
        Some(EntryType::OccupationalHealthcare) => {
            let employer_name = NonEmptyText::new(&draft.employer_name)
                .map_err(|_| ValidationError::MissingEmployer)?;
            let sick_leave = build_sick_leave(draft)?;
            Ok(EntryData::OccupationalHealthcare(OccupationalHealthcareEntry {
                base,
                employer_name,
                sick_leave,
            }))
        }
        None => Err(ValidationError::UnknownEntryType),
    }
}

fn required(field: &'static str, value: &str) -> Result<NonEmptyText, ValidationError> {
    NonEmptyText::new(value).map_err(|_| ValidationError::MissingRequiredField { field })
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    value
        .trim()
        .parse::<NaiveDate>()
        .map_err(|_| ValidationError::InvalidDate { field })
}

/// Sick leave is optional, but a half-specified interval is invalid: either
/// both bounds are present (with start not after end) or neither is.
fn build_sick_leave(draft: &EntryDraft) -> Result<Option<SickLeave>, ValidationError> {
    let start = draft.sick_leave_start_date.trim();
    let end = draft.sick_leave_end_date.trim();

    match (start.is_empty(), end.is_empty()) {
        (true, true) => Ok(None),
        (false, false) => {
            let start_date = parse_date("sickLeaveStartDate", start)?;
            let end_date = parse_date("sickLeaveEndDate", end)?;
            if start_date > end_date {
                return Err(ValidationError::InvalidSickLeaveRange);
            }
            Ok(Some(SickLeave {
                start_date,
                end_date,
            }))
        }
        _ => Err(ValidationError::InvalidSickLeaveRange),
    }
}

/// Splits the comma-separated draft value into an ordered code list.
///
/// Order is preserved and duplicates are kept; empty segments are dropped.
fn split_codes(raw: &str) -> Vec<DiagnosisCode> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        // segments are non-empty here, so construction cannot fail
        .filter_map(|segment| DiagnosisCode::new(segment).ok())
        .collect()
}
