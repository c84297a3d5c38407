//! Medical record request schema

use crate::date::normalize_date;
use crate::error::{issues_from, FieldIssue, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /patients/{id}/medical_records` and `PUT /medical_records/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MedicalRecordCreate {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub diagnosis: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub treatment: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub prescription: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub notes: Option<String>,
    pub record_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMedicalRecord {
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: String,
    pub notes: Option<String>,
    pub record_date: NaiveDate,
}

impl TryFrom<MedicalRecordCreate> for NewMedicalRecord {
    type Error = ValidationError;

    fn try_from(raw: MedicalRecordCreate) -> Result<Self, Self::Error> {
        let mut issues = issues_from(raw.validate());

        let record_date = match normalize_date(&raw.record_date) {
            Ok(date) => Some(date),
            Err(e) => {
                issues.push(FieldIssue::new("record_date", e.to_string()));
                None
            }
        };

        match record_date {
            Some(record_date) if issues.is_empty() => Ok(NewMedicalRecord {
                diagnosis: raw.diagnosis,
                treatment: raw.treatment,
                prescription: raw.prescription,
                notes: raw.notes,
                record_date,
            }),
            _ => Err(ValidationError::new(issues)),
        }
    }
}
