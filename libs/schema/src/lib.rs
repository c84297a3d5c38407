//! Request schemas for the medrec service
//!
//! This crate turns raw JSON request bodies into validated records that the
//! server can persist. It performs no I/O.
//!
//! # Module Organization
//!
//! - `date`: lenient `YYYY-MM-DD` date normalization
//! - `error`: [`ValidationError`] with one [`FieldIssue`] per offending field
//! - `patient`: [`PatientCreate`] (raw) and [`NewPatient`] (validated)
//! - `medical_record`: [`MedicalRecordCreate`] (raw) and [`NewMedicalRecord`] (validated)
//!
//! # Example
//!
//! ```rust
//! use medrec_schema::{NewPatient, PatientCreate};
//! use serde_json::json;
//!
//! let raw: PatientCreate = serde_json::from_value(json!({
//!     "first_name": "Ada",
//!     "last_name": "Lovelace",
//!     "date_of_birth": "1815-12-10",
//!     "gender": "female",
//!     "phone": "555-0100",
//!     "email": "ada@example.org",
//!     "age": 36
//! }))
//! .unwrap();
//!
//! let patient = NewPatient::try_from(raw).unwrap();
//! assert_eq!(patient.date_of_birth.to_string(), "1815-12-10");
//! assert!(patient.address.is_none());
//! ```

pub mod date;
pub mod error;
pub mod medical_record;
pub mod patient;

pub use date::{normalize_date, DateError};
pub use error::{FieldIssue, ValidationError};
pub use medical_record::{MedicalRecordCreate, NewMedicalRecord};
pub use patient::{NewPatient, PatientCreate};
