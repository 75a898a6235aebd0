use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One rejected field of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    pub field: String,
    pub reason: String,
}

impl FieldIssue {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Error type for generation, aggregation and submission intake.
///
/// Crosses the foreign boundary as a flat error: bindings see the variant
/// name and the rendered message.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
#[uniffi(flat_error)]
pub enum CarbonError {
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    #[error("invalid period key '{key}': {reason}")]
    InvalidPeriodKey { key: String, reason: String },

    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid submission: {}", describe_issues(.issues))]
    InvalidSubmission { issues: Vec<FieldIssue> },

    #[error("serialization error: {0}")]
    Serialization(String),
}

fn describe_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} ({})", issue.field, issue.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<serde_json::Error> for CarbonError {
    fn from(err: serde_json::Error) -> Self {
        CarbonError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carbon_error_display() {
        let err = CarbonError::InvalidPeriod("hourly".to_string());
        assert_eq!(err.to_string(), "invalid period: hourly");

        let err = CarbonError::InvalidPeriodKey {
            key: "2024-13".to_string(),
            reason: "month out of range".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid period key '2024-13': month out of range"
        );

        let err = CarbonError::InvalidSubmission {
            issues: vec![
                FieldIssue::new("latitude", "required"),
                FieldIssue::new("depthM", "must be between 5 and 200"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid submission: latitude (required), depthM (must be between 5 and 200)"
        );
    }
}
