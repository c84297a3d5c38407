//! medrec - patient and medical record service
//!
//! An HTTP service for keeping patients and their medical records:
//! - CRUD for patients with unique phone and email
//! - medical records owned by patients, optionally one active record each
//! - cascade or detach of records when a patient is deleted
//! - SQLite storage through `sqlx`, with embedded migrations

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod startup;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
