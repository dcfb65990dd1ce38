//! The transient, unvalidated draft for a new entry.
//!
//! The draft is variant-aware: the shared fields are always present, the
//! variant-specific fields become relevant once an entry type is selected.
//! Everything is kept as the raw strings the user typed; narrowing into a
//! valid entry variant happens in [`crate::validation::build_entry`].

use crate::entry::EntryType;

/// Raw field input for a new entry, prior to successful construction.
///
/// Owned by the form controller; reset after each successful submission. A
/// field edit merges by wire field name, overwriting the prior value.
/// Selecting a different entry type keeps already-entered shared fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryDraft {
    /// Selected variant; `None` until the user picks one.
    pub entry_type: Option<EntryType>,

    // Shared fields, relevant whichever variant is selected.
    pub description: String,
    pub date: String,
    pub specialist: String,
    /// Comma-separated code list, as typed.
    pub diagnosis_codes: String,

    // HealthCheck
    pub health_check_rating: String,

    // Hospital
    pub discharge_date: String,
    pub discharge_criteria: String,

    // OccupationalHealthcare
    pub employer_name: String,
    pub sick_leave_start_date: String,
    pub sick_leave_end_date: String,
}

/// Errors from field-name-driven draft edits.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),

    #[error("unknown entry type '{0}'")]
    UnknownEntryType(String),
}

impl EntryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the entry variant the form is drafting.
    ///
    /// Shared fields already entered are kept; only which variant-specific
    /// fields are relevant changes.
    pub fn select_type(&mut self, entry_type: EntryType) {
        self.entry_type = Some(entry_type);
    }

    /// Merges one field edit into the draft by wire field name, overwriting
    /// any prior value for that field.
    ///
    /// `type` is accepted as a field name so field-name-driven callers (the
    /// CLI, a key-value form) can drive the whole draft through one call.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] for an unknown field name or an unknown entry
    /// type value; the draft is left unchanged in either case.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "type" => {
                let entry_type = EntryType::from_wire(value)
                    .ok_or_else(|| FieldError::UnknownEntryType(value.to_owned()))?;
                self.entry_type = Some(entry_type);
            }
            "description" => self.description = value.to_owned(),
            "date" => self.date = value.to_owned(),
            "specialist" => self.specialist = value.to_owned(),
            "diagnosisCodes" => self.diagnosis_codes = value.to_owned(),
            "healthCheckRating" => self.health_check_rating = value.to_owned(),
            "dischargeDate" => self.discharge_date = value.to_owned(),
            "dischargeCriteria" => self.discharge_criteria = value.to_owned(),
            "employerName" => self.employer_name = value.to_owned(),
            "sickLeaveStartDate" => self.sick_leave_start_date = value.to_owned(),
            "sickLeaveEndDate" => self.sick_leave_end_date = value.to_owned(),
            other => return Err(FieldError::UnknownField(other.to_owned())),
        }
        Ok(())
    }

    /// Resets every field, including the selected type.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no field has been touched.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
