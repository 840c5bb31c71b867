//! Structured error types for configuration builds.

use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Caller contract violations
    MissingRequiredField,
    InvalidFieldValue,
    UnknownTarget,

    // Configuration file problems
    ConfigError,
}

/// Structured error raised by a target builder.
#[derive(Debug, Error, Serialize)]
#[error("{message}")]
pub struct BuildError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl BuildError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    // Convenience constructors

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{} is required", field),
        )
        .with_field(field)
    }

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::new(ErrorCode::InvalidFieldValue, reason).with_field(field)
    }

    pub fn unknown_target(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownTarget,
            format!(
                "Unknown target: {} (expected client, server or universal)",
                name
            ),
        )
    }

    pub fn config(err: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Result type for build operations.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = BuildError::missing_field("entry");
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert_eq!(err.field.as_deref(), Some("entry"));
        assert_eq!(err.to_string(), "entry is required");
    }

    #[test]
    fn test_serializes_code_in_screaming_case() {
        let err = BuildError::unknown_target("desktop");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "UNKNOWN_TARGET");
        assert!(json.get("field").is_none());
    }
}
