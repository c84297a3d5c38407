use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

/// Assert HTTP status code
pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(
        actual, expected,
        "{context}: expected status {expected}, got {actual}"
    );
}

/// Assert status is 2xx success
pub fn assert_success(status: StatusCode, context: &str) {
    assert!(
        status.is_success(),
        "{context}: expected success status, got {status}"
    );
}

/// Assert an error body carries `code` and `detail`
pub fn assert_error(body: &Value, code: &str, detail: &str) {
    assert_eq!(body["code"], code, "unexpected error code in {body}");
    assert_eq!(body["detail"], detail, "unexpected error detail in {body}");
}

/// Fields named by the issues of a validation error body
pub fn issue_fields(body: &Value) -> anyhow::Result<Vec<String>> {
    let issues = body["issues"]
        .as_array()
        .context("validation error has an issues array")?;
    Ok(issues
        .iter()
        .filter_map(|issue| issue["field"].as_str().map(str::to_string))
        .collect())
}

/// Record ids of a JSON array of medical records
pub fn record_ids(records: &Value) -> anyhow::Result<Vec<i64>> {
    records
        .as_array()
        .context("expected an array of medical records")?
        .iter()
        .map(|record| record["record_id"].as_i64().context("record_id is an integer"))
        .collect()
}
