//! Domain models for the medrec server

pub mod medical_record;
pub mod patient;

pub use medical_record::{MedicalRecord, RecordWrite, RecordWriteResult};
pub use patient::{Patient, PatientResponse};
