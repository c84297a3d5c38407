//! Medical record handlers

use crate::{
    api::extractors::{IdPath, JsonBody},
    state::AppState,
    Result,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use medrec_schema::{MedicalRecordCreate, NewMedicalRecord};
use serde_json::json;

/// POST /patients/{id}/medical_records
///
/// 201 when a record was inserted, 200 when the patient's active record was
/// overwritten.
pub async fn create_medical_record(
    State(state): State<AppState>,
    IdPath(patient_id): IdPath,
    JsonBody(payload): JsonBody<MedicalRecordCreate>,
) -> Result<impl IntoResponse> {
    let record = NewMedicalRecord::try_from(payload)?;
    let result = state
        .record_service
        .create_for_patient(patient_id, record)
        .await?;

    let status =
        StatusCode::from_u16(result.operation.status_code()).unwrap_or(StatusCode::OK);
    Ok((status, Json(result.record)))
}

/// GET /patients/{id}/medical_records
pub async fn list_medical_records(
    State(state): State<AppState>,
    IdPath(patient_id): IdPath,
) -> Result<impl IntoResponse> {
    let records = state.record_service.list_for_patient(patient_id).await?;
    Ok(Json(records))
}

/// PUT /medical_records/{id}
pub async fn update_medical_record(
    State(state): State<AppState>,
    IdPath(record_id): IdPath,
    JsonBody(payload): JsonBody<MedicalRecordCreate>,
) -> Result<impl IntoResponse> {
    let record = NewMedicalRecord::try_from(payload)?;
    let updated = state.record_service.update(record_id, record).await?;
    Ok(Json(updated))
}

/// DELETE /medical_records/{id}
pub async fn delete_medical_record(
    State(state): State<AppState>,
    IdPath(record_id): IdPath,
) -> Result<impl IntoResponse> {
    state.record_service.delete(record_id).await?;
    Ok(Json(json!({ "message": "Medical record deleted successfully" })))
}
