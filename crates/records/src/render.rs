//! Pure entry rendering: variant to display fields.
//!
//! [`render`] maps an entry to the fields a front end shows for it: the
//! shared base fields, the variant-specific details, and the diagnosis codes
//! resolved against the directory. It performs no mutation and no I/O, and
//! the match over the variants is exhaustive at compile time.

use chrono::NaiveDate;

use crate::diagnosis::DiagnosisDirectory;
use crate::entry::{Entry, EntryData, EntryType, HealthCheckRating, SickLeave};

/// A diagnosis code with its display resolution.
///
/// `resolved` is `None` when the directory does not know the code; display
/// degrades to a placeholder, it never fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosisLine {
    pub code: String,
    pub resolved: Option<String>,
}

impl std::fmt::Display for DiagnosisLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.resolved {
            Some(name) => write!(f, "{} {}", self.code, name),
            None => write!(f, "{} (unknown code)", self.code),
        }
    }
}

/// Variant-specific display fields; exactly the extra fields of each entry
/// variant, nothing shared.
#[derive(Clone, Debug, PartialEq)]
pub enum EntryDetails {
    HealthCheck {
        rating: HealthCheckRating,
    },
    Hospital {
        discharge_date: NaiveDate,
        discharge_criteria: String,
    },
    OccupationalHealthcare {
        employer_name: String,
        sick_leave: Option<SickLeave>,
    },
}

/// The display representation of one entry.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryView {
    pub id: String,
    /// Heading label, e.g. "Hospital entry".
    pub heading: &'static str,
    pub date: NaiveDate,
    pub description: String,
    pub specialist: String,
    pub diagnoses: Vec<DiagnosisLine>,
    pub details: EntryDetails,
}

/// Heading shown for a variant.
fn heading(entry_type: EntryType) -> &'static str {
    match entry_type {
        EntryType::HealthCheck => "Health check entry",
        EntryType::Hospital => "Hospital entry",
        EntryType::OccupationalHealthcare => "Occupational healthcare entry",
    }
}

/// Renders one entry into its display fields, resolving diagnosis codes
/// against the directory.
pub fn render(entry: &Entry, directory: &DiagnosisDirectory) -> EntryView {
    let base = entry.data.base();

    let diagnoses = base
        .diagnosis_codes
        .iter()
        .map(|code| DiagnosisLine {
            code: code.as_str().to_owned(),
            resolved: directory.lookup(code.as_str()).map(|d| d.name.clone()),
        })
        .collect();

    let details = match &entry.data {
        EntryData::HealthCheck(hc) => EntryDetails::HealthCheck {
            rating: hc.health_check_rating,
        },
        EntryData::Hospital(h) => EntryDetails::Hospital {
            discharge_date: h.discharge.date,
            discharge_criteria: h.discharge.criteria.clone(),
        },
        EntryData::OccupationalHealthcare(o) => EntryDetails::OccupationalHealthcare {
            employer_name: o.employer_name.as_str().to_owned(),
            sick_leave: o.sick_leave.clone(),
        },
    };

    EntryView {
        id: entry.id.clone(),
        heading: heading(entry.data.entry_type()),
        date: base.date,
        description: base.description.as_str().to_owned(),
        specialist: base.specialist.as_str().to_owned(),
        diagnoses,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::Diagnosis;
    use crate::entry::{
        Discharge, EntryBase, HealthCheckEntry, HospitalEntry, OccupationalHealthcareEntry,
    };
    use medview_types::{DiagnosisCode, NonEmptyText};

    fn base(codes: &[&str]) -> EntryBase {
        EntryBase {
            description: NonEmptyText::new("Yearly control visit").expect("valid"),
            date: NaiveDate::from_ymd_opt(2024, 2, 18).expect("valid date"),
            specialist: NonEmptyText::new("MD House").expect("valid"),
            diagnosis_codes: codes
                .iter()
                .map(|c| DiagnosisCode::new(c).expect("valid code"))
                .collect(),
        }
    }

    fn directory() -> DiagnosisDirectory {
        DiagnosisDirectory::from_entries([Diagnosis {
            code: DiagnosisCode::new("M24.2").expect("valid code"),
            name: "Disorder of ligament".into(),
            latin: None,
        }])
    }

    #[test]
    fn health_check_view_carries_only_its_extra_field() {
        let entry = Entry {
            id: "e1".into(),
            data: EntryData::HealthCheck(HealthCheckEntry {
                base: base(&[]),
                health_check_rating: HealthCheckRating::HighRisk,
            }),
        };
        let view = render(&entry, &directory());
        assert_eq!(view.heading, "Health check entry");
        assert_eq!(view.specialist, "MD House");
        assert_eq!(
            view.details,
            EntryDetails::HealthCheck {
                rating: HealthCheckRating::HighRisk
            }
        );
    }

    #[test]
    fn hospital_view_carries_discharge() {
        let entry = Entry {
            id: "e2".into(),
            data: EntryData::Hospital(HospitalEntry {
                base: base(&[]),
                discharge: Discharge {
                    date: NaiveDate::from_ymd_opt(2024, 2, 20).expect("valid date"),
                    criteria: "Symptoms resolved".into(),
                },
            }),
        };
        let view = render(&entry, &directory());
        match view.details {
            EntryDetails::Hospital {
                discharge_date,
                discharge_criteria,
            } => {
                assert_eq!(discharge_date.to_string(), "2024-02-20");
                assert_eq!(discharge_criteria, "Symptoms resolved");
            }
            other => panic!("wrong details: {other:?}"),
        }
    }

    #[test]
    fn occupational_view_carries_employer_and_leave() {
        let entry = Entry {
            id: "e3".into(),
            data: EntryData::OccupationalHealthcare(OccupationalHealthcareEntry {
                base: base(&[]),
                employer_name: NonEmptyText::new("Acme").expect("valid"),
                sick_leave: None,
            }),
        };
        let view = render(&entry, &directory());
        assert_eq!(
            view.details,
            EntryDetails::OccupationalHealthcare {
                employer_name: "Acme".into(),
                sick_leave: None
            }
        );
    }

    #[test]
    fn known_and_unknown_codes_resolve_differently() {
        let entry = Entry {
            id: "e4".into(),
            data: EntryData::HealthCheck(HealthCheckEntry {
                base: base(&["M24.2", "Z99.9"]),
                health_check_rating: HealthCheckRating::Healthy,
            }),
        };
        let view = render(&entry, &directory());
        assert_eq!(view.diagnoses.len(), 2);
        assert_eq!(
            view.diagnoses[0].to_string(),
            "M24.2 Disorder of ligament"
        );
        assert_eq!(view.diagnoses[1].to_string(), "Z99.9 (unknown code)");
    }
}
