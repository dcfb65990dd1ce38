//! Router-level tests for the development API server.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use medview_run::{AppState, router};

fn app() -> axum::Router {
    router(AppState::seeded().expect("seed data parses"))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

#[tokio::test]
async fn health_answers_ok() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn get_patient_returns_seeded_aggregate() {
    let response = app()
        .oneshot(
            Request::get("/patients/d2785732-f723-11e9-8f0b-362b9e155667")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let patient = body_json(response).await;
    assert_eq!(patient["name"], "Dana Scully");
    assert_eq!(patient["entries"].as_array().expect("entries").len(), 1);
}

#[tokio::test]
async fn unknown_patient_is_404() {
    let response = app()
        .oneshot(Request::get("/patients/nope").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn diagnoses_list_is_served() {
    let response = app()
        .oneshot(Request::get("/diagnoses").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(response).await;
    let codes: Vec<&str> = list
        .as_array()
        .expect("array")
        .iter()
        .map(|d| d["code"].as_str().expect("code"))
        .collect();
    assert!(codes.contains(&"M24.2"));
}

#[tokio::test]
async fn posting_an_entry_grows_the_aggregate() {
    let app = app();
    let body = json!({
        "type": "HealthCheck",
        "description": "Yearly control visit",
        "date": "2024-02-18",
        "specialist": "MD House",
        "healthCheckRating": 1,
        "diagnosisCodes": ["M24.2"]
    });

    let response = app
        .oneshot(
            Request::post("/patients/d27736ec-f723-11e9-8f0b-362b9e155667/entries")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let patient = body_json(response).await;
    let entries = patient["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    // server assigned an id
    assert!(entries[0]["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(entries[0]["type"], "HealthCheck");
}

#[tokio::test]
async fn foreign_entry_type_is_rejected_with_400() {
    let body = json!({
        "type": "Dental",
        "description": "Cavity filled",
        "date": "2024-02-18",
        "specialist": "DDS Plemons"
    });

    let response = app()
        .oneshot(
            Request::post("/patients/d27736ec-f723-11e9-8f0b-362b9e155667/entries")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(
        error["error"].as_str().expect("message").contains("Dental"),
        "error should name the foreign type"
    );
}

#[tokio::test]
async fn malformed_entry_body_is_rejected_with_400() {
    // Hospital entry without its discharge details
    let body = json!({
        "type": "Hospital",
        "description": "Broken leg",
        "date": "2024-02-18",
        "specialist": "MD House"
    });

    let response = app()
        .oneshot(
            Request::post("/patients/d27736ec-f723-11e9-8f0b-362b9e155667/entries")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
