use axum::body::Bytes;
use serde_json::{json, Map, Value};

/// Converts a JSON value to request body bytes
pub fn to_json_body(value: &Value) -> anyhow::Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

/// Builder for patient payloads
///
/// Starts from a complete valid patient; each setter overrides one field.
pub struct PatientBuilder {
    fields: Map<String, Value>,
}

impl PatientBuilder {
    pub fn new() -> Self {
        let Value::Object(fields) = json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "date_of_birth": "1990-04-12",
            "gender": "female",
            "phone": "555-0100",
            "email": "jane.doe@example.com",
            "address": "1 Main Street",
            "age": 34
        }) else {
            unreachable!("object literal")
        };
        Self { fields }
    }

    pub fn first_name(self, value: impl Into<String>) -> Self {
        self.set("first_name", Value::String(value.into()))
    }

    pub fn last_name(self, value: impl Into<String>) -> Self {
        self.set("last_name", Value::String(value.into()))
    }

    pub fn date_of_birth(self, value: impl Into<String>) -> Self {
        self.set("date_of_birth", Value::String(value.into()))
    }

    pub fn gender(self, value: impl Into<String>) -> Self {
        self.set("gender", Value::String(value.into()))
    }

    pub fn phone(self, value: impl Into<String>) -> Self {
        self.set("phone", Value::String(value.into()))
    }

    pub fn email(self, value: impl Into<String>) -> Self {
        self.set("email", Value::String(value.into()))
    }

    pub fn address(self, value: impl Into<String>) -> Self {
        self.set("address", Value::String(value.into()))
    }

    pub fn age(self, value: i64) -> Self {
        self.set("age", json!(value))
    }

    /// Drop a field entirely (to exercise missing-field handling).
    pub fn without(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self
    }

    /// Set an arbitrary field, including ones with the wrong JSON type.
    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for PatientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for medical record payloads
pub struct MedicalRecordBuilder {
    fields: Map<String, Value>,
}

impl MedicalRecordBuilder {
    pub fn new() -> Self {
        let Value::Object(fields) = json!({
            "diagnosis": "Seasonal influenza",
            "treatment": "Rest and fluids",
            "prescription": "Oseltamivir 75mg",
            "notes": "Follow up in one week",
            "record_date": "2024-01-05"
        }) else {
            unreachable!("object literal")
        };
        Self { fields }
    }

    pub fn diagnosis(self, value: impl Into<String>) -> Self {
        self.set("diagnosis", Value::String(value.into()))
    }

    pub fn treatment(self, value: impl Into<String>) -> Self {
        self.set("treatment", Value::String(value.into()))
    }

    pub fn prescription(self, value: impl Into<String>) -> Self {
        self.set("prescription", Value::String(value.into()))
    }

    pub fn notes(self, value: impl Into<String>) -> Self {
        self.set("notes", Value::String(value.into()))
    }

    pub fn record_date(self, value: impl Into<String>) -> Self {
        self.set("record_date", Value::String(value.into()))
    }

    pub fn without(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self
    }

    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for MedicalRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
