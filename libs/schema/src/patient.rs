//! Patient request schema

use crate::date::normalize_date;
use crate::error::{issues_from, FieldIssue, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /patients` and `PUT /patients/{id}`.
///
/// Widths follow the `patients` table columns. The date stays a string here
/// so that loosely formatted values reach [`normalize_date`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PatientCreate {
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub first_name: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub last_name: String,
    pub date_of_birth: String,
    #[validate(length(max = 10, message = "must be at most 10 characters"))]
    pub gender: String,
    #[validate(length(max = 15, message = "must be at most 15 characters"))]
    pub phone: String,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub address: Option<String>,
    pub age: i32,
}

/// A patient that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
    pub age: i32,
}

impl TryFrom<PatientCreate> for NewPatient {
    type Error = ValidationError;

    fn try_from(raw: PatientCreate) -> Result<Self, Self::Error> {
        let mut issues = issues_from(raw.validate());

        let date_of_birth = match normalize_date(&raw.date_of_birth) {
            Ok(date) => Some(date),
            Err(e) => {
                issues.push(FieldIssue::new("date_of_birth", e.to_string()));
                None
            }
        };

        match date_of_birth {
            Some(date_of_birth) if issues.is_empty() => Ok(NewPatient {
                first_name: raw.first_name,
                last_name: raw.last_name,
                date_of_birth,
                gender: raw.gender,
                phone: raw.phone,
                email: raw.email,
                address: raw.address,
                age: raw.age,
            }),
            _ => Err(ValidationError::new(issues)),
        }
    }
}
