//! In-memory development server for the MedView client.
//!
//! Serves the REST collaborator interface the viewer expects:
//! - `GET /health`
//! - `GET /patients/{id}`
//! - `POST /patients/{id}/entries`
//! - `GET /diagnoses`
//!
//! State is an in-memory store seeded with demo patients and the bundled
//! diagnosis list; nothing is persisted. Posted entries are narrowed through
//! the records model before being appended, so the server rejects malformed
//! bodies the same way the client-side validation would.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use medview_records::{Diagnosis, DiagnosisDirectory, EntryData, EntryType};

/// Demo patients bundled into the binary, shape per `GET /patients/{id}`.
const SEED_PATIENTS: &str = include_str!("../data/patients.json");

/// Application state shared across the REST handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
}

struct Store {
    patients: HashMap<String, Value>,
    diagnoses: Vec<Diagnosis>,
}

impl AppState {
    /// Builds the state from explicit data.
    pub fn new(patients: Vec<Value>, diagnoses: Vec<Diagnosis>) -> Self {
        let patients = patients
            .into_iter()
            .filter_map(|p| {
                let id = p.get("id")?.as_str()?.to_owned();
                Some((id, p))
            })
            .collect();
        Self {
            store: Arc::new(RwLock::new(Store {
                patients,
                diagnoses,
            })),
        }
    }

    /// Builds the state from the bundled demo patients and diagnosis list.
    pub fn seeded() -> anyhow::Result<Self> {
        let patients: Vec<Value> = serde_json::from_str(SEED_PATIENTS)?;
        let diagnoses = DiagnosisDirectory::bundled_entries()?;
        Ok(Self::new(patients, diagnoses))
    }
}

/// Builds the REST router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patients/:id", get(get_patient))
        .route("/patients/:id/entries", post(add_entry))
        .route("/diagnoses", get(list_diagnoses))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let store = state.store.read().map_err(|_| store_unavailable())?;
    match store.patients.get(&id) {
        Some(patient) => Ok(Json(patient.clone())),
        None => Err(not_found()),
    }
}

async fn add_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    // Closed variant set: reject foreign discriminators before schema checks.
    let tag = body.get("type").and_then(Value::as_str).unwrap_or_default();
    if EntryType::from_wire(tag).is_none() {
        return Err(bad_request(format!("unsupported entry type '{tag}'")));
    }

    let entry: EntryData = serde_json::from_value(body)
        .map_err(|e| bad_request(format!("invalid entry: {e}")))?;

    let mut object = serde_json::to_value(&entry)
        .map_err(|e| bad_request(format!("invalid entry: {e}")))?;
    object["id"] = Value::String(uuid::Uuid::new_v4().to_string());

    let mut store = state.store.write().map_err(|_| store_unavailable())?;
    let Some(patient) = store.patients.get_mut(&id) else {
        return Err(not_found());
    };

    match patient.get_mut("entries").and_then(Value::as_array_mut) {
        Some(entries) => entries.push(object),
        None => {
            patient["entries"] = Value::Array(vec![object]);
        }
    }

    tracing::info!("appended {} entry to patient {id}", entry.entry_type());
    Ok(Json(patient.clone()))
}

async fn list_diagnoses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Diagnosis>>, (StatusCode, Json<Value>)> {
    let store = state.store.read().map_err(|_| store_unavailable())?;
    Ok(Json(store.diagnoses.clone()))
}

fn store_unavailable() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "store unavailable" })),
    )
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "patient not found" })),
    )
}

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}
