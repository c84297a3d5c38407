//! Business logic layer
//!
//! Services own the pool and apply the record-keeping policies; handlers only
//! translate HTTP to service calls.

pub mod medical_records;
pub mod metrics;
pub mod patients;

pub use medical_records::MedicalRecordService;
pub use metrics::MetricsService;
pub use patients::PatientService;
