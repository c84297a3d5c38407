//! Shared application state handed to every handler.

use crate::config::Config;
use crate::services::{MedicalRecordService, MetricsService, PatientService};
use crate::{startup, Result};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: SqlitePool,
    pub patient_service: Arc<PatientService>,
    pub record_service: Arc<MedicalRecordService>,
    pub metrics_service: Arc<MetricsService>,
}

impl AppState {
    /// Connect to the database, apply migrations if enabled and wire services.
    pub async fn new(config: Config) -> Result<Self> {
        let pool = startup::connect_pool(&config.database).await?;

        if config.database.run_migrations {
            startup::run_migrations(&pool).await?;
        }

        Ok(Self::with_pool(config, pool))
    }

    /// Wire services around an existing pool.
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let patient_service = PatientService::new(pool.clone(), config.records.patient_delete);
        let record_service =
            MedicalRecordService::new(pool.clone(), config.records.single_active_record);
        let metrics_service = MetricsService::new(pool.clone());

        Self {
            config: Arc::new(config),
            db_pool: pool,
            patient_service: Arc::new(patient_service),
            record_service: Arc::new(record_service),
            metrics_service: Arc::new(metrics_service),
        }
    }
}
