use super::builders::{MedicalRecordBuilder, PatientBuilder};
use serde_json::Value;

/// A valid patient payload
pub fn minimal_patient() -> Value {
    PatientBuilder::new().build()
}

/// A valid patient whose phone and email are derived from `n`, so patients
/// built from different `n` never collide.
pub fn numbered_patient(n: u32) -> Value {
    PatientBuilder::new()
        .first_name(format!("Patient{n}"))
        .phone(format!("555-{n:04}"))
        .email(format!("patient{n}@example.com"))
        .build()
}

/// A valid medical record payload
pub fn minimal_record() -> Value {
    MedicalRecordBuilder::new().build()
}

/// A valid medical record with the given diagnosis
pub fn record_with_diagnosis(diagnosis: &str) -> Value {
    MedicalRecordBuilder::new().diagnosis(diagnosis).build()
}
