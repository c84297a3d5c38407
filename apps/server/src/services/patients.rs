//! Patient service
//!
//! Enforces the patient invariants on top of the repository:
//! - phone and email are unique across patients (checked before every write)
//! - deleting a patient cascades to or detaches its medical records, per policy
//!
//! Every write runs in a single transaction.

use crate::config::PatientDeletePolicy;
use crate::db::{self, medical_records, patients, ContactField};
use crate::models::{MedicalRecord, Patient, PatientResponse};
use crate::{Error, Result};
use medrec_schema::NewPatient;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

const NOT_FOUND: &str = "Patient not found";

pub struct PatientService {
    pool: SqlitePool,
    delete_policy: PatientDeletePolicy,
}

impl PatientService {
    pub fn new(pool: SqlitePool, delete_policy: PatientDeletePolicy) -> Self {
        Self {
            pool,
            delete_policy,
        }
    }

    pub async fn create(&self, patient: NewPatient) -> Result<PatientResponse> {
        let mut tx = db::begin_write(&self.pool).await?;

        ensure_contacts_available(&mut tx, &patient, None).await?;
        let created = patients::insert(&mut tx, &patient).await?;

        tx.commit().await?;

        tracing::info!(patient_id = created.id, "Patient created");

        Ok(PatientResponse::new(created, Vec::new()))
    }

    pub async fn get(&self, id: i64) -> Result<PatientResponse> {
        let mut conn = self.pool.acquire().await?;

        let patient = patients::find(&mut conn, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let records = medical_records::list_for_patient(&mut conn, id).await?;

        Ok(PatientResponse::new(patient, records))
    }

    /// Every patient with its records, ordered by id.
    pub async fn list(&self) -> Result<Vec<PatientResponse>> {
        let mut conn = self.pool.acquire().await?;

        let all = patients::list(&mut conn).await?;
        let mut by_owner = group_by_owner(medical_records::list_attached(&mut conn).await?);

        Ok(all
            .into_iter()
            .map(|patient| {
                let records = by_owner.remove(&patient.id).unwrap_or_default();
                PatientResponse::new(patient, records)
            })
            .collect())
    }

    /// Replace every field of patient `id`.
    ///
    /// The uniqueness check ignores the patient itself, so resubmitting its own
    /// phone or email is allowed.
    pub async fn update(&self, id: i64, patient: NewPatient) -> Result<PatientResponse> {
        let mut tx = db::begin_write(&self.pool).await?;

        if !patients::exists(&mut tx, id).await? {
            return Err(not_found(id));
        }
        ensure_contacts_available(&mut tx, &patient, Some(id)).await?;

        let updated = patients::update(&mut tx, id, &patient)
            .await?
            .ok_or_else(|| not_found(id))?;
        let records = medical_records::list_for_patient(&mut tx, id).await?;

        tx.commit().await?;

        tracing::info!(patient_id = id, "Patient updated");

        Ok(PatientResponse::new(updated, records))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = db::begin_write(&self.pool).await?;

        if !patients::exists(&mut tx, id).await? {
            return Err(not_found(id));
        }

        let affected_records = match self.delete_policy {
            PatientDeletePolicy::Cascade => medical_records::delete_for_patient(&mut tx, id).await?,
            PatientDeletePolicy::Detach => {
                medical_records::detach_from_patient(&mut tx, id).await?
            }
        };
        patients::delete(&mut tx, id).await?;

        tx.commit().await?;

        tracing::info!(
            patient_id = id,
            policy = ?self.delete_policy,
            affected_records,
            "Patient deleted"
        );

        Ok(())
    }
}

/// Reject `patient` when another patient already uses its phone or email.
async fn ensure_contacts_available(
    conn: &mut SqliteConnection,
    patient: &NewPatient,
    exclude_id: Option<i64>,
) -> Result<()> {
    let contacts = [
        (ContactField::Phone, patient.phone.as_str()),
        (ContactField::Email, patient.email.as_str()),
    ];

    for (field, value) in contacts {
        if let Some(owner) = patients::find_contact_owner(conn, field, value, exclude_id).await? {
            tracing::debug!(
                field = field.as_str(),
                existing_patient_id = owner,
                "Contact already in use"
            );
            return Err(Error::Conflict(format!(
                "A patient with this {} already exists",
                field.as_str()
            )));
        }
    }

    Ok(())
}

fn group_by_owner(records: Vec<MedicalRecord>) -> HashMap<i64, Vec<MedicalRecord>> {
    let mut grouped: HashMap<i64, Vec<MedicalRecord>> = HashMap::new();
    for record in records {
        if let Some(owner) = record.patient_id {
            grouped.entry(owner).or_default().push(record);
        }
    }
    grouped
}

fn not_found(id: i64) -> Error {
    tracing::debug!(patient_id = id, "Patient not found");
    Error::NotFound(NOT_FOUND.to_string())
}
