//! Medical record repository - data access for the `medical_records` table

use crate::models::MedicalRecord;
use crate::{Error, Result};
use medrec_schema::NewMedicalRecord;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

const RECORD_COLUMNS: &str =
    "record_id, patient_id, diagnosis, treatment, prescription, notes, record_date";

/// Records owned by `patient_id`, oldest first.
pub async fn list_for_patient(
    conn: &mut SqliteConnection,
    patient_id: i64,
) -> Result<Vec<MedicalRecord>> {
    let rows = sqlx::query(&format!(
        "SELECT {RECORD_COLUMNS} FROM medical_records WHERE patient_id = ? ORDER BY record_id"
    ))
    .bind(patient_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(Error::Database)?;

    Ok(rows.iter().map(record_from_row).collect())
}

/// Every record that still has an owner, ordered by owner then record id.
pub async fn list_attached(conn: &mut SqliteConnection) -> Result<Vec<MedicalRecord>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {RECORD_COLUMNS}
        FROM medical_records
        WHERE patient_id IS NOT NULL
        ORDER BY patient_id, record_id
        "#
    ))
    .fetch_all(&mut *conn)
    .await
    .map_err(Error::Database)?;

    Ok(rows.iter().map(record_from_row).collect())
}

/// The most recently created record of `patient_id`.
pub async fn latest_for_patient(
    conn: &mut SqliteConnection,
    patient_id: i64,
) -> Result<Option<MedicalRecord>> {
    let row = sqlx::query(&format!(
        r#"
        SELECT {RECORD_COLUMNS}
        FROM medical_records
        WHERE patient_id = ?
        ORDER BY record_id DESC
        LIMIT 1
        "#
    ))
    .bind(patient_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(Error::Database)?;

    Ok(row.map(|row| record_from_row(&row)))
}

pub async fn insert(
    conn: &mut SqliteConnection,
    patient_id: i64,
    record: &NewMedicalRecord,
) -> Result<MedicalRecord> {
    let row = sqlx::query(&format!(
        r#"
        INSERT INTO medical_records
            (patient_id, diagnosis, treatment, prescription, notes, record_date)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {RECORD_COLUMNS}
        "#
    ))
    .bind(patient_id)
    .bind(&record.diagnosis)
    .bind(&record.treatment)
    .bind(&record.prescription)
    .bind(&record.notes)
    .bind(record.record_date)
    .fetch_one(&mut *conn)
    .await
    .map_err(Error::Database)?;

    Ok(record_from_row(&row))
}

/// Replace the clinical fields of a record; the owner is left untouched.
pub async fn update(
    conn: &mut SqliteConnection,
    record_id: i64,
    record: &NewMedicalRecord,
) -> Result<Option<MedicalRecord>> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE medical_records
        SET diagnosis = ?,
            treatment = ?,
            prescription = ?,
            notes = ?,
            record_date = ?
        WHERE record_id = ?
        RETURNING {RECORD_COLUMNS}
        "#
    ))
    .bind(&record.diagnosis)
    .bind(&record.treatment)
    .bind(&record.prescription)
    .bind(&record.notes)
    .bind(record.record_date)
    .bind(record_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(Error::Database)?;

    Ok(row.map(|row| record_from_row(&row)))
}

pub async fn delete(conn: &mut SqliteConnection, record_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM medical_records WHERE record_id = ?")
        .bind(record_id)
        .execute(&mut *conn)
        .await
        .map_err(Error::Database)?;

    Ok(result.rows_affected() > 0)
}

/// Delete every record of `patient_id`, returning how many were removed.
pub async fn delete_for_patient(conn: &mut SqliteConnection, patient_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM medical_records WHERE patient_id = ?")
        .bind(patient_id)
        .execute(&mut *conn)
        .await
        .map_err(Error::Database)?;

    Ok(result.rows_affected())
}

/// Clear the owner of every record of `patient_id`, returning how many changed.
pub async fn detach_from_patient(conn: &mut SqliteConnection, patient_id: i64) -> Result<u64> {
    let result =
        sqlx::query("UPDATE medical_records SET patient_id = NULL WHERE patient_id = ?")
            .bind(patient_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Database)?;

    Ok(result.rows_affected())
}

fn record_from_row(row: &SqliteRow) -> MedicalRecord {
    MedicalRecord {
        record_id: row.get("record_id"),
        patient_id: row.get("patient_id"),
        diagnosis: row.get("diagnosis"),
        treatment: row.get("treatment"),
        prescription: row.get("prescription"),
        notes: row.get("notes"),
        record_date: row.get("record_date"),
    }
}
