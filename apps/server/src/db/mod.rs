//! Database layer - repositories and data access
//!
//! Repositories are plain async functions over a `SqliteConnection`. Reads run
//! on a pooled connection, writes on the connection of an open transaction.

pub mod medical_records;
pub mod metrics;
pub mod patients;

pub use metrics::MetricsRepository;
pub use patients::ContactField;

use crate::Result;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Open a write transaction holding the database write lock from the start.
///
/// Writes read before they write. Under a deferred `BEGIN` the read-to-write
/// upgrade fails with `SQLITE_BUSY` instead of waiting on the busy timeout.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}
