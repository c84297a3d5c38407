//! Stored medical records

use chrono::NaiveDate;
use serde::Serialize;

/// A row of the `medical_records` table.
///
/// `patient_id` is `None` only for records detached from a deleted patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicalRecord {
    pub record_id: i64,
    pub patient_id: Option<i64>,
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: String,
    pub notes: Option<String>,
    pub record_date: NaiveDate,
}

/// How a create-for-patient request was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordWrite {
    /// A new record was inserted (HTTP 201)
    Created,

    /// The patient's existing record was overwritten in place (HTTP 200)
    Updated,
}

impl RecordWrite {
    pub fn status_code(&self) -> u16 {
        match self {
            RecordWrite::Created => 201,
            RecordWrite::Updated => 200,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordWriteResult {
    pub record: MedicalRecord,
    pub operation: RecordWrite,
}
