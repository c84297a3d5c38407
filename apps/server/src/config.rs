//! Server configuration
//!
//! Sources, lowest precedence first:
//! 1. compiled defaults (`Config::default()`)
//! 2. `config.{toml,yaml,json}` in the working directory, or the file passed with `--config`
//! 3. environment variables prefixed with `MEDREC__`, sections separated by `__`
//!    (e.g. `MEDREC__DATABASE__URL`, `MEDREC__RECORDS__PATIENT_DELETE=detach`)
//!
//! A `.env` file is loaded into the process environment first when present.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub records: RecordsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
    /// Allowed CORS origins. `"*"` allows any origin; empty disables CORS headers.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_request_body_size: 1024 * 1024,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_min_size: u32,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
    /// How long a writer waits on SQLite's database lock before failing.
    pub busy_timeout_seconds: u64,
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://medrec.db".to_string(),
            pool_min_size: 1,
            pool_max_size: 10,
            pool_timeout_seconds: 30,
            busy_timeout_seconds: 5,
            run_migrations: true,
        }
    }
}

/// Record-keeping policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// Keep at most one medical record per patient: a second create overwrites
    /// the existing record in place.
    pub single_active_record: bool,
    pub patient_delete: PatientDeletePolicy,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            single_active_record: true,
            patient_delete: PatientDeletePolicy::Cascade,
        }
    }
}

/// What happens to a patient's medical records when the patient is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientDeletePolicy {
    /// Delete the records together with the patient.
    #[default]
    Cascade,
    /// Keep the records and clear their owner.
    Detach,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,

    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of `daily`, `hourly`, `minutely`, `never`.
    pub file_rotation: String,

    pub opentelemetry_enabled: bool,
    pub otlp_endpoint: String,
    pub otlp_timeout_seconds: u64,
    pub trace_sample_ratio: f64,
    pub service_name: String,
    pub service_version: Option<String>,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "./logs".to_string(),
            file_prefix: "medrec".to_string(),
            file_rotation: "daily".to_string(),
            opentelemetry_enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            otlp_timeout_seconds: 10,
            trace_sample_ratio: 1.0,
            service_name: "medrec".to_string(),
            service_version: None,
            deployment_environment: "development".to_string(),
        }
    }
}

const ENV_PREFIX: &str = "MEDREC";

impl Config {
    /// Load configuration from the default file location and the environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default `config.*` file.
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("config").required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.trim().is_empty() {
            return Err("database.url must not be empty".to_string());
        }
        if self.database.pool_max_size == 0 {
            return Err("database.pool_max_size must be greater than 0".to_string());
        }
        if self.database.pool_min_size > self.database.pool_max_size {
            return Err(format!(
                "database.pool_min_size ({}) must not exceed database.pool_max_size ({})",
                self.database.pool_min_size, self.database.pool_max_size
            ));
        }
        if !(0.0..=1.0).contains(&self.logging.trace_sample_ratio) {
            return Err(format!(
                "logging.trace_sample_ratio must be within [0, 1], got {}",
                self.logging.trace_sample_ratio
            ));
        }
        if !matches!(
            self.logging.file_rotation.as_str(),
            "daily" | "hourly" | "minutely" | "never"
        ) {
            return Err(format!(
                "logging.file_rotation must be one of daily, hourly, minutely, never; got '{}'",
                self.logging.file_rotation
            ));
        }
        Ok(())
    }

    /// Resolve `server.host`/`server.port` into a listen address.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()
            .with_context(|| format!("Invalid listen address {}", self.server.host))?
            .next()
            .with_context(|| format!("No address found for host {}", self.server.host))
    }
}
