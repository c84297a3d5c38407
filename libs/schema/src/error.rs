//! Validation errors

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// A problem with a single request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Malformed input. Carries one issue per offending field, sorted by field name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(mut issues: Vec<FieldIssue>) -> Self {
        issues.sort_by(|a, b| a.field.cmp(&b.field));
        Self { issues }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue::new(field, message)],
        }
    }

    /// Map a body deserialization failure to a field issue.
    ///
    /// serde reports a missing field as ``missing field `name` ``; that name is
    /// lifted out so the client sees which field to fix. Anything else is
    /// reported against `body`.
    pub fn from_json_error(err: &serde_json::Error) -> Self {
        let message = err.to_string();
        let field = message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
            .unwrap_or("body")
            .to_string();
        Self::single(field, message)
    }

    /// Names of the offending fields, in order.
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let issues = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldIssue::new(field.to_string(), message)
                })
            })
            .collect();
        Self::new(issues)
    }
}

/// Collect validator failures (if any) as field issues.
pub(crate) fn issues_from(result: Result<(), ValidationErrors>) -> Vec<FieldIssue> {
    match result {
        Ok(()) => Vec::new(),
        Err(errors) => ValidationError::from(errors).issues,
    }
}

fn describe(issues: &[FieldIssue]) -> String {
    let details: Vec<String> = issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect();
    format!("Validation failed: {}", details.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_are_sorted_by_field() {
        let err = ValidationError::new(vec![
            FieldIssue::new("phone", "too long"),
            FieldIssue::new("email", "invalid"),
        ]);
        assert_eq!(err.fields(), vec!["email", "phone"]);
        assert_eq!(
            err.to_string(),
            "Validation failed: email: invalid; phone: too long"
        );
    }

    #[test]
    fn missing_field_is_named() {
        let json_err =
            serde_json::from_str::<crate::PatientCreate>(r#"{"first_name": "A"}"#).unwrap_err();
        let err = ValidationError::from_json_error(&json_err);
        assert_eq!(err.fields(), vec!["last_name"]);
    }

    #[test]
    fn syntax_errors_are_reported_against_body() {
        let json_err = serde_json::from_str::<crate::PatientCreate>("{not json").unwrap_err();
        let err = ValidationError::from_json_error(&json_err);
        assert_eq!(err.fields(), vec!["body"]);
    }
}
