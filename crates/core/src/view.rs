//! View assembly: the display representation of a loaded patient.

use medview_records::{render, DiagnosisDirectory, EntryView, Gender, PatientAggregate};

/// Everything a front end shows for one patient: demographics, the rendered
/// entry list, and one line per entry that could not be rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientView {
    pub name: String,
    pub gender: Gender,
    pub ssn: Option<String>,
    pub occupation: String,
    pub date_of_birth: Option<String>,
    pub entries: Vec<EntryView>,
    /// One message per defective entry; the rest of the view is unaffected.
    pub defects: Vec<String>,
}

impl PatientView {
    /// Builds the view for an aggregate, resolving diagnosis codes against
    /// the directory.
    pub fn build(aggregate: &PatientAggregate, directory: &DiagnosisDirectory) -> Self {
        let entries = aggregate
            .entries
            .iter()
            .map(|entry| render(entry, directory))
            .collect();

        let defects = aggregate
            .defects
            .iter()
            .map(|d| format!("entry {} could not be rendered: {}", d.position + 1, d.reason))
            .collect();

        PatientView {
            name: aggregate.name.clone(),
            gender: aggregate.gender,
            ssn: aggregate.ssn.clone(),
            occupation: aggregate.occupation.clone(),
            date_of_birth: aggregate.date_of_birth.map(|d| d.to_string()),
            entries,
            defects,
        }
    }
}
