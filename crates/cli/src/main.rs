use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use medview_api_client::RestClient;
use medview_core::{PatientApi, PatientSession, PatientView};
use medview_records::{EntryDetails, EntryType, EntryView};

#[derive(Parser)]
#[command(name = "medview")]
#[command(about = "MedView patient record viewer/editor CLI")]
struct Cli {
    /// Base URL of the patient-record API (overrides MEDVIEW_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a patient and their medical entries
    Show {
        /// Patient identifier
        patient_id: String,
    },
    /// List the diagnosis directory
    Diagnoses,
    /// Append a new entry to a patient's record
    AddEntry {
        /// Patient identifier
        patient_id: String,
        /// Which entry variant to create
        #[arg(long, value_enum)]
        entry_type: EntryKind,
        /// What happened
        #[arg(long)]
        description: String,
        /// Date of the event (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Attending specialist
        #[arg(long)]
        specialist: String,
        /// Comma-separated diagnosis codes
        #[arg(long)]
        diagnosis_codes: Option<String>,
        /// Health check rating 0-3 (health-check entries)
        #[arg(long)]
        rating: Option<String>,
        /// Discharge date (hospital entries)
        #[arg(long)]
        discharge_date: Option<String>,
        /// Discharge criteria (hospital entries)
        #[arg(long)]
        discharge_criteria: Option<String>,
        /// Employer name (occupational healthcare entries)
        #[arg(long)]
        employer: Option<String>,
        /// Sick leave start date (occupational healthcare entries)
        #[arg(long)]
        sick_leave_start: Option<String>,
        /// Sick leave end date (occupational healthcare entries)
        #[arg(long)]
        sick_leave_end: Option<String>,
    },
}

/// CLI spelling of the entry discriminator.
#[derive(Clone, Copy, ValueEnum)]
enum EntryKind {
    HealthCheck,
    Hospital,
    OccupationalHealthcare,
}

impl From<EntryKind> for EntryType {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::HealthCheck => EntryType::HealthCheck,
            EntryKind::Hospital => EntryType::Hospital,
            EntryKind::OccupationalHealthcare => EntryType::OccupationalHealthcare,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let client = match &cli.api_url {
        Some(url) => RestClient::new(url.clone()),
        None => RestClient::from_env(),
    };

    match cli.command {
        Commands::Show { patient_id } => {
            let mut session = PatientSession::new(client);
            load_directory_or_bundled(&mut session).await;
            if let Err(e) = session.load(&patient_id).await {
                eprintln!("Error fetching patient: {}", e);
                return Ok(());
            }
            if let Some(view) = session.view() {
                print_patient(&view);
            }
        }
        Commands::Diagnoses => match client.fetch_diagnoses().await {
            Ok(list) => {
                if list.is_empty() {
                    println!("No diagnoses found.");
                }
                for diagnosis in list {
                    match &diagnosis.latin {
                        Some(latin) => {
                            println!("{} {} ({})", diagnosis.code, diagnosis.name, latin)
                        }
                        None => println!("{} {}", diagnosis.code, diagnosis.name),
                    }
                }
            }
            Err(e) => eprintln!("Error fetching diagnoses: {}", e),
        },
        Commands::AddEntry {
            patient_id,
            entry_type,
            description,
            date,
            specialist,
            diagnosis_codes,
            rating,
            discharge_date,
            discharge_criteria,
            employer,
            sick_leave_start,
            sick_leave_end,
        } => {
            let mut session = PatientSession::new(client);
            load_directory_or_bundled(&mut session).await;
            if let Err(e) = session.load(&patient_id).await {
                eprintln!("Error fetching patient: {}", e);
                return Ok(());
            }

            session.select_entry_type(entry_type.into())?;
            session.edit_field("description", &description)?;
            session.edit_field("date", &date)?;
            session.edit_field("specialist", &specialist)?;

            let optional = [
                ("diagnosisCodes", diagnosis_codes),
                ("healthCheckRating", rating),
                ("dischargeDate", discharge_date),
                ("dischargeCriteria", discharge_criteria),
                ("employerName", employer),
                ("sickLeaveStartDate", sick_leave_start),
                ("sickLeaveEndDate", sick_leave_end),
            ];
            for (field, value) in optional {
                if let Some(value) = value {
                    session.edit_field(field, &value)?;
                }
            }

            match session.submit_entry().await {
                Ok(()) => {
                    let count = session.patient().map_or(0, |p| p.entries.len());
                    println!("Entry added; patient now has {} entries.", count);
                }
                Err(e) => eprintln!("Error adding entry: {}", e),
            }
        }
    }

    Ok(())
}

/// Loads the remote diagnosis directory, falling back to the bundled list
/// when the API is unreachable so codes still resolve in the output.
async fn load_directory_or_bundled<A: PatientApi>(session: &mut PatientSession<A>) {
    session.load_directory().await;
    if session.directory().is_empty() {
        if let Err(e) = session.use_bundled_directory() {
            eprintln!("Error loading bundled diagnoses: {}", e);
        }
    }
}

fn print_patient(view: &PatientView) {
    println!("{} ({})", view.name, view.gender.label());
    if let Some(ssn) = &view.ssn {
        println!("ssn: {}", ssn);
    }
    println!("occupation: {}", view.occupation);
    if let Some(born) = &view.date_of_birth {
        println!("born: {}", born);
    }

    if view.entries.is_empty() && view.defects.is_empty() {
        println!("\nNo entries.");
    }
    for entry in &view.entries {
        println!();
        print_entry(entry);
    }
    for defect in &view.defects {
        println!();
        eprintln!("! {}", defect);
    }
}

fn print_entry(entry: &EntryView) {
    println!("{} - {}", entry.heading, entry.date);
    println!("  {}", entry.description);
    println!("  specialist: {}", entry.specialist);
    for line in &entry.diagnoses {
        println!("  - {}", line);
    }
    match &entry.details {
        EntryDetails::HealthCheck { rating } => {
            println!("  rating: {} ({})", rating.ordinal(), rating.label());
        }
        EntryDetails::Hospital {
            discharge_date,
            discharge_criteria,
        } => {
            if discharge_criteria.is_empty() {
                println!("  discharged: {}", discharge_date);
            } else {
                println!("  discharged: {} ({})", discharge_date, discharge_criteria);
            }
        }
        EntryDetails::OccupationalHealthcare {
            employer_name,
            sick_leave,
        } => {
            println!("  employer: {}", employer_name);
            if let Some(leave) = sick_leave {
                println!("  sick leave: {} to {}", leave.start_date, leave.end_date);
            }
        }
    }
}
