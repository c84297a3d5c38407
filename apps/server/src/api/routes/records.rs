//! Patient and medical record routes
//!
//! Every path is registered with and without a trailing slash; both forms are
//! served directly, without redirects.

use crate::api::handlers::{medical_records, patients};
use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn record_routes() -> Router<AppState> {
    Router::new()
        // Patients
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/:id",
            get(patients::read_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/patients/:id/",
            get(patients::read_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        // Medical records of a patient
        .route(
            "/patients/:id/medical_records",
            get(medical_records::list_medical_records)
                .post(medical_records::create_medical_record),
        )
        .route(
            "/patients/:id/medical_records/",
            get(medical_records::list_medical_records)
                .post(medical_records::create_medical_record),
        )
        // Medical records by id
        .route(
            "/medical_records/:id",
            put(medical_records::update_medical_record)
                .delete(medical_records::delete_medical_record),
        )
        .route(
            "/medical_records/:id/",
            put(medical_records::update_medical_record)
                .delete(medical_records::delete_medical_record),
        )
}
