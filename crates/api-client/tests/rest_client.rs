//! End-to-end tests: the reqwest client against the dev server bound to an
//! ephemeral port.

use medview_core::{ApiError, PatientApi, PatientSession};
use medview_records::EntryType;
use medview_api_client::RestClient;
use medview_run::{AppState, router};

/// Serves the seeded dev API on an ephemeral port and returns a client for it.
async fn spawn_server() -> RestClient {
    let state = AppState::seeded().expect("seed data parses");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.expect("server runs");
    });
    RestClient::new(format!("http://{addr}"))
}

const SCULLY: &str = "d2785732-f723-11e9-8f0b-362b9e155667";
const GRUBER: &str = "d27736ec-f723-11e9-8f0b-362b9e155667";

#[tokio::test]
async fn fetches_a_seeded_patient() {
    let client = spawn_server().await;
    let patient = client.fetch_patient(SCULLY).await.expect("patient exists");
    assert_eq!(patient.name, "Dana Scully");
    assert_eq!(patient.entries.len(), 1);
}

#[tokio::test]
async fn unknown_patient_maps_to_not_found() {
    let client = spawn_server().await;
    let err = client.fetch_patient("nope").await.expect_err("missing");
    assert!(matches!(err, ApiError::NotFound));
}

#[tokio::test]
async fn unreachable_server_maps_to_network_error() {
    // nothing listens here
    let client = RestClient::new("http://127.0.0.1:9");
    let err = client.fetch_patient(SCULLY).await.expect_err("no server");
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn diagnoses_round_trip() {
    let client = spawn_server().await;
    let list = client.fetch_diagnoses().await.expect("list served");
    assert!(list.iter().any(|d| d.code.as_str() == "Z57.1"));
}

#[tokio::test]
async fn session_against_real_server_appends_an_entry() {
    let client = spawn_server().await;
    let mut session = PatientSession::new(client);
    session.load_directory().await;
    session.load(GRUBER).await.expect("patient exists");
    assert_eq!(session.patient().expect("loaded").entries.len(), 0);

    session.select_entry_type(EntryType::OccupationalHealthcare).expect("editing");
    session.edit_field("description", "Ear checkup after site visit").expect("editing");
    session.edit_field("date", "2024-03-11").expect("editing");
    session.edit_field("specialist", "MD House").expect("editing");
    session.edit_field("employerName", "Nakatomi Corp").expect("editing");
    session.edit_field("diagnosisCodes", "H54.7").expect("editing");

    session.submit_entry().await.expect("accepted");

    let patient = session.patient().expect("loaded");
    assert_eq!(patient.entries.len(), 1);
    assert!(session.form().draft().is_blank());

    // the entry resolves its diagnosis code through the fetched directory
    let view = session.view().expect("loaded");
    assert_eq!(
        view.entries[0].diagnoses[0].to_string(),
        "H54.7 Unspecified visual loss"
    );
}

#[tokio::test]
async fn invalid_draft_is_stopped_before_any_request() {
    let client = spawn_server().await;
    let mut session = PatientSession::new(client);
    session.load(GRUBER).await.expect("patient exists");

    session.select_entry_type(EntryType::HealthCheck).expect("editing");
    session.edit_field("description", "Yearly control visit").expect("editing");
    session.edit_field("date", "2024-03-11").expect("editing");
    session.edit_field("specialist", "MD House").expect("editing");
    session.edit_field("healthCheckRating", "9").expect("editing");

    session.submit_entry().await.expect_err("invalid rating");
    // aggregate untouched
    assert_eq!(session.patient().expect("loaded").entries.len(), 0);
}
