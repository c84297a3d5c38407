//! Metrics collection for the medrec server
//!
//! This module defines the Prometheus metrics exposed on `/metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, register_int_gauge_vec,
    HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "medrec_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "medrec_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "medrec_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    /// HTTP request body size in bytes
    pub static ref HTTP_REQUEST_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "medrec_http_request_size_bytes",
        "HTTP request body size in bytes",
        &["method", "path"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    )
    .expect("Failed to register HTTP_REQUEST_SIZE_BYTES");

    /// HTTP response size in bytes
    pub static ref HTTP_RESPONSE_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "medrec_http_response_size_bytes",
        "HTTP response size in bytes",
        &["method", "path", "status"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    )
    .expect("Failed to register HTTP_RESPONSE_SIZE_BYTES");

    // Entity Operation Metrics

    /// Operations by entity (patient, medical_record) and operation
    pub static ref ENTITY_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "medrec_entity_operations_total",
        "Total number of entity operations",
        &["entity", "operation", "status"]
    )
    .expect("Failed to register ENTITY_OPERATIONS_TOTAL");

    /// Entity operation duration
    pub static ref ENTITY_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "medrec_entity_operation_duration_seconds",
        "Entity operation duration in seconds",
        &["entity", "operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register ENTITY_OPERATION_DURATION_SECONDS");

    // Database Metrics

    /// Active database connections
    pub static ref DB_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "medrec_db_connections_active",
        "Number of active database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_ACTIVE");

    /// Idle database connections
    pub static ref DB_CONNECTIONS_IDLE: IntGauge = register_int_gauge!(
        "medrec_db_connections_idle",
        "Number of idle database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_IDLE");

    /// Stored rows by entity, refreshed on scrape
    pub static ref ENTITIES_TOTAL: IntGaugeVec = register_int_gauge_vec!(
        "medrec_entities_total",
        "Total number of stored entities by type",
        &["entity"]
    )
    .expect("Failed to register ENTITIES_TOTAL");
}

/// Helper to sanitize path for metrics labels (replace ids, limit cardinality)
pub fn sanitize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => "/".to_string(),
        ["patients"] => "/patients".to_string(),
        ["patients", _] => "/patients/{id}".to_string(),
        ["patients", _, "medical_records"] => "/patients/{id}/medical_records".to_string(),
        ["medical_records", _] => "/medical_records/{id}".to_string(),
        [single] if !single.chars().all(|c| c.is_ascii_digit()) => format!("/{single}"),
        // Unknown shapes collapse to their first segment
        [first, ..] => format!("/{first}/*"),
    }
}

/// Extract the entity a path operates on
pub fn extract_entity(path: &str) -> Option<&'static str> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        ["patients"] | ["patients", _] => Some("patient"),
        ["patients", _, "medical_records"] | ["medical_records", _] => Some("medical_record"),
        _ => None,
    }
}

/// Extract the entity operation from path and method
pub fn extract_operation(method: &str, path: &str) -> Option<&'static str> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let is_collection = matches!(
        segments.as_slice(),
        ["patients"] | ["patients", _, "medical_records"]
    );

    match method {
        "GET" if is_collection => Some("list"),
        "GET" => Some("read"),
        "POST" => Some("create"),
        "PUT" => Some("update"),
        "DELETE" => Some("delete"),
        _ => None,
    }
}
