#![allow(unused)]
#[allow(unused)]
mod support;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use support::{
    assert_error, assert_status, issue_fields, minimal_patient, minimal_record, record_ids,
    record_with_diagnosis, with_test_app, MedicalRecordBuilder,
};

#[tokio::test]
async fn first_record_is_created() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient_id = app.create_patient(&minimal_patient()).await?;

            let (status, record) = app.create_record(patient_id, &minimal_record()).await?;
            assert_status(status, StatusCode::CREATED, "create record");
            assert!(record["record_id"].is_i64());
            assert_eq!(record["patient_id"], patient_id);
            assert_eq!(record["diagnosis"], "Seasonal influenza");
            assert_eq!(record["record_date"], "2024-01-05");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn record_for_missing_patient_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.create_record(404, &minimal_record()).await?;
            assert_status(status, StatusCode::NOT_FOUND, "record for missing patient");
            assert_error(&body, "not-found", "Patient not found");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn loose_record_dates_are_normalized() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient_id = app.create_patient(&minimal_patient()).await?;

            let record = MedicalRecordBuilder::new().record_date("2024-1-5").build();
            let (status, body) = app.create_record(patient_id, &record).await?;
            assert_status(status, StatusCode::CREATED, "loose record date");
            assert_eq!(body["record_date"], "2024-01-05");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn invalid_record_is_unprocessable() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient_id = app.create_patient(&minimal_patient()).await?;

            let record = MedicalRecordBuilder::new()
                .diagnosis("d".repeat(256))
                .record_date("2024/01/05")
                .build();
            let (status, body) = app.create_record(patient_id, &record).await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "invalid record");
            assert_eq!(issue_fields(&body)?, vec!["diagnosis", "record_date"]);

            let (_, records) = app
                .json(
                    Method::GET,
                    &format!("/patients/{patient_id}/medical_records"),
                    None,
                )
                .await?;
            assert_eq!(records, json!([]));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn notes_are_optional() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient_id = app.create_patient(&minimal_patient()).await?;

            let record = MedicalRecordBuilder::new().without("notes").build();
            let (status, body) = app.create_record(patient_id, &record).await?;
            assert_status(status, StatusCode::CREATED, "record without notes");
            assert_eq!(body["notes"], Value::Null);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_for_unknown_patient_is_empty() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .json(Method::GET, "/patients/12345/medical_records", None)
                .await?;
            assert_status(status, StatusCode::OK, "list for unknown patient");
            assert_eq!(body, json!([]));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn patient_read_includes_records() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient_id = app.create_patient(&minimal_patient()).await?;
            let (_, record) = app.create_record(patient_id, &minimal_record()).await?;

            let (_, patient) = app
                .json(Method::GET, &format!("/patients/{patient_id}"), None)
                .await?;
            assert_eq!(patient["medical_records"], json!([record]));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_replaces_clinical_fields() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient_id = app.create_patient(&minimal_patient()).await?;
            let (_, record) = app.create_record(patient_id, &minimal_record()).await?;
            let record_id = record["record_id"].as_i64().expect("integer record_id");

            let replacement = MedicalRecordBuilder::new()
                .diagnosis("Bronchitis")
                .without("notes")
                .record_date("2024-02-01")
                .build();
            let (status, updated) = app
                .json(
                    Method::PUT,
                    &format!("/medical_records/{record_id}"),
                    Some(&replacement),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update record");
            assert_eq!(updated["record_id"], record_id);
            assert_eq!(updated["patient_id"], patient_id);
            assert_eq!(updated["diagnosis"], "Bronchitis");
            assert_eq!(updated["notes"], Value::Null);
            assert_eq!(updated["record_date"], "2024-02-01");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_missing_record_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .json(Method::PUT, "/medical_records/77", Some(&minimal_record()))
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "update missing record");
            assert_error(&body, "not-found", "Medical record not found");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_record() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let patient_id = app.create_patient(&minimal_patient()).await?;
            let (_, record) = app.create_record(patient_id, &minimal_record()).await?;
            let record_id = record["record_id"].as_i64().expect("integer record_id");

            let (status, body) = app
                .json(Method::DELETE, &format!("/medical_records/{record_id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "delete record");
            assert_eq!(body["message"], "Medical record deleted successfully");

            let (status, body) = app
                .json(Method::DELETE, &format!("/medical_records/{record_id}/"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "delete record twice");
            assert_error(&body, "not-found", "Medical record not found");

            let (_, patient) = app
                .json(Method::GET, &format!("/patients/{patient_id}"), None)
                .await?;
            assert_eq!(patient["medical_records"], json!([]));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn non_integer_record_id_is_bad_request() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _) = app
                .json(Method::DELETE, "/medical_records/first", None)
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "non-integer record id");
            Ok(())
        })
    })
    .await
}
