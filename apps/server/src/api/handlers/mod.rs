//! Request handlers for API endpoints
//!
//! Handlers coordinate between routes and services, handling:
//! - Request extraction and validation
//! - Service invocation
//! - Response formatting

pub mod medical_records;
pub mod metrics;
pub mod patients;

pub use medical_records::*;
pub use metrics::*;
pub use patients::*;
