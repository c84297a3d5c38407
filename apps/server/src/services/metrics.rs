//! Metrics service for collecting application metrics

use crate::db::metrics::Table;
use crate::db::MetricsRepository;
use sqlx::SqlitePool;

/// Service for collecting application metrics
pub struct MetricsService {
    repo: MetricsRepository,
}

impl MetricsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: MetricsRepository::new(pool),
        }
    }

    /// Update database connection pool metrics
    pub fn update_db_connection_metrics(&self) {
        let pool_size = self.repo.get_pool_size();
        let idle = self.repo.get_num_idle() as u32;

        crate::metrics::DB_CONNECTIONS_ACTIVE.set(pool_size.saturating_sub(idle) as i64);
        crate::metrics::DB_CONNECTIONS_IDLE.set(idle as i64);
    }

    /// Refresh the stored row count of each table
    pub async fn update_entity_metrics(&self) {
        for table in [Table::Patients, Table::MedicalRecords] {
            match self.repo.count_rows(table).await {
                Ok(count) => crate::metrics::ENTITIES_TOTAL
                    .with_label_values(&[table.label()])
                    .set(count),
                Err(e) => tracing::warn!("Failed to count {} rows: {}", table.label(), e),
            }
        }
    }

    /// Refresh the gauges that are sampled rather than counted
    pub async fn refresh(&self) {
        self.update_db_connection_metrics();
        self.update_entity_metrics().await;
    }

    /// Static server information, appended to the registry output
    pub fn server_info(&self, server_version: &str) -> String {
        let mut output = String::new();

        output.push_str("# HELP medrec_server_info Medical record server information\n");
        output.push_str("# TYPE medrec_server_info gauge\n");
        output.push_str(&format!(
            "medrec_server_info{{version=\"{}\"}} 1\n",
            server_version
        ));

        output
    }
}
