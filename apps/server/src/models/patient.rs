//! Stored patients and their response shape

use super::MedicalRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// A row of the `patients` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
    pub age: i32,
}

/// A patient together with the medical records it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientResponse {
    #[serde(flatten)]
    pub patient: Patient,
    pub medical_records: Vec<MedicalRecord>,
}

impl PatientResponse {
    pub fn new(patient: Patient, medical_records: Vec<MedicalRecord>) -> Self {
        Self {
            patient,
            medical_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_flattens_patient_fields() {
        let patient = Patient {
            id: 3,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            gender: "female".to_string(),
            phone: "555-0100".to_string(),
            email: "ada@example.com".to_string(),
            address: None,
            age: 36,
        };

        let value = serde_json::to_value(PatientResponse::new(patient, Vec::new())).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 3,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "date_of_birth": "1815-12-10",
                "gender": "female",
                "phone": "555-0100",
                "email": "ada@example.com",
                "address": null,
                "age": 36,
                "medical_records": []
            })
        );
    }
}
