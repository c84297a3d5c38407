//! Patient handlers

use crate::{
    api::extractors::{IdPath, JsonBody},
    state::AppState,
    Result,
};
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use medrec_schema::{NewPatient, PatientCreate};
use serde_json::json;

/// POST /patients
///
/// Returns 201 with a `Location` header pointing at the new patient.
pub async fn create_patient(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<PatientCreate>,
) -> Result<Response> {
    let patient = NewPatient::try_from(payload)?;
    let created = state.patient_service.create(patient).await?;

    let mut response = (StatusCode::CREATED, Json(&created)).into_response();
    if let Ok(location) = HeaderValue::from_str(&format!("/patients/{}", created.patient.id)) {
        response.headers_mut().insert(header::LOCATION, location);
    }

    Ok(response)
}

/// GET /patients/{id}
pub async fn read_patient(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse> {
    let patient = state.patient_service.get(id).await?;
    Ok(Json(patient))
}

/// GET /patients
pub async fn list_patients(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let patients = state.patient_service.list().await?;
    Ok(Json(patients))
}

/// PUT /patients/{id}
pub async fn update_patient(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<PatientCreate>,
) -> Result<impl IntoResponse> {
    let patient = NewPatient::try_from(payload)?;
    let updated = state.patient_service.update(id, patient).await?;
    Ok(Json(updated))
}

/// DELETE /patients/{id}
pub async fn delete_patient(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse> {
    state.patient_service.delete(id).await?;
    Ok(Json(json!({ "message": "Patient deleted successfully" })))
}
