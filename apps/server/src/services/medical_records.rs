//! Medical record service

use crate::db::{self, medical_records, patients};
use crate::models::{MedicalRecord, RecordWrite, RecordWriteResult};
use crate::{Error, Result};
use medrec_schema::NewMedicalRecord;
use sqlx::SqlitePool;

const NOT_FOUND: &str = "Medical record not found";
const PATIENT_NOT_FOUND: &str = "Patient not found";

pub struct MedicalRecordService {
    pool: SqlitePool,
    single_active_record: bool,
}

impl MedicalRecordService {
    pub fn new(pool: SqlitePool, single_active_record: bool) -> Self {
        Self {
            pool,
            single_active_record,
        }
    }

    /// Add a record to patient `patient_id`.
    ///
    /// In single-active-record mode the patient's latest record is overwritten
    /// in place and the result reports [`RecordWrite::Updated`].
    pub async fn create_for_patient(
        &self,
        patient_id: i64,
        record: NewMedicalRecord,
    ) -> Result<RecordWriteResult> {
        let mut tx = db::begin_write(&self.pool).await?;

        if !patients::exists(&mut tx, patient_id).await? {
            tracing::debug!(patient_id, "Record owner not found");
            return Err(Error::NotFound(PATIENT_NOT_FOUND.to_string()));
        }

        let existing = if self.single_active_record {
            medical_records::latest_for_patient(&mut tx, patient_id).await?
        } else {
            None
        };

        let result = match existing {
            Some(current) => {
                let updated = medical_records::update(&mut tx, current.record_id, &record)
                    .await?
                    .ok_or_else(|| {
                        Error::Internal(format!(
                            "medical record {} vanished during overwrite",
                            current.record_id
                        ))
                    })?;
                RecordWriteResult {
                    record: updated,
                    operation: RecordWrite::Updated,
                }
            }
            None => RecordWriteResult {
                record: medical_records::insert(&mut tx, patient_id, &record).await?,
                operation: RecordWrite::Created,
            },
        };

        tx.commit().await?;

        tracing::info!(
            patient_id,
            record_id = result.record.record_id,
            operation = ?result.operation,
            "Medical record written"
        );

        Ok(result)
    }

    /// Records of `patient_id` ordered by record id. Unknown patients have none.
    pub async fn list_for_patient(&self, patient_id: i64) -> Result<Vec<MedicalRecord>> {
        let mut conn = self.pool.acquire().await?;
        medical_records::list_for_patient(&mut conn, patient_id).await
    }

    /// Replace the clinical fields of record `record_id`.
    pub async fn update(&self, record_id: i64, record: NewMedicalRecord) -> Result<MedicalRecord> {
        let mut tx = db::begin_write(&self.pool).await?;

        let updated = medical_records::update(&mut tx, record_id, &record)
            .await?
            .ok_or_else(|| not_found(record_id))?;

        tx.commit().await?;

        tracing::info!(record_id, "Medical record updated");

        Ok(updated)
    }

    pub async fn delete(&self, record_id: i64) -> Result<()> {
        let mut tx = db::begin_write(&self.pool).await?;

        if !medical_records::delete(&mut tx, record_id).await? {
            return Err(not_found(record_id));
        }

        tx.commit().await?;

        tracing::info!(record_id, "Medical record deleted");

        Ok(())
    }
}

fn not_found(record_id: i64) -> Error {
    tracing::debug!(record_id, "Medical record not found");
    Error::NotFound(NOT_FOUND.to_string())
}
