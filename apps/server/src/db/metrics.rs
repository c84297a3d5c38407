//! Metrics repository - database queries for metrics and monitoring

use sqlx::SqlitePool;

/// Repository for metrics database operations
#[derive(Clone)]
pub struct MetricsRepository {
    pool: SqlitePool,
}

impl MetricsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Row count of one of the record tables
    pub async fn count_rows(&self, table: Table) -> Result<i64, sqlx::Error> {
        let query = match table {
            Table::Patients => "SELECT COUNT(*) FROM patients",
            Table::MedicalRecords => "SELECT COUNT(*) FROM medical_records",
        };
        let result: (i64,) = sqlx::query_as(query).fetch_one(&self.pool).await?;

        Ok(result.0)
    }

    /// Get connection pool size (for metrics)
    pub fn get_pool_size(&self) -> u32 {
        self.pool.size()
    }

    /// Get number of idle connections (for metrics)
    pub fn get_num_idle(&self) -> usize {
        self.pool.num_idle()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Table {
    Patients,
    MedicalRecords,
}

impl Table {
    pub fn label(&self) -> &'static str {
        match self {
            Table::Patients => "patient",
            Table::MedicalRecords => "medical_record",
        }
    }
}
