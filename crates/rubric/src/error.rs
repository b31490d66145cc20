//! Error types for the Rubric library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Rubric operations.
#[derive(Debug, Error)]
pub enum RubricError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A compliance framework was requested that the registry does not define.
    #[error("Unknown compliance framework: '{name}'")]
    UnknownFramework { name: String },

    /// A framework definition is malformed (missing sections list, bad threshold, ...).
    #[error("Invalid framework definition '{framework}': {reason}")]
    InvalidFramework { framework: String, reason: String },

    /// An input is missing a field the engine cannot work without.
    #[error("Missing required field '{field}' in {entity}")]
    MissingField { entity: String, field: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl RubricError {
    /// Whether this error comes from configuration rather than call inputs.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            RubricError::UnknownFramework { .. }
                | RubricError::InvalidFramework { .. }
                | RubricError::Config(_)
                | RubricError::Regex(_)
        )
    }

    pub(crate) fn missing_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        RubricError::MissingField {
            entity: entity.into(),
            field: field.into(),
        }
    }

    pub(crate) fn invalid_framework(
        framework: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RubricError::InvalidFramework {
            framework: framework.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Rubric operations.
pub type Result<T> = std::result::Result<T, RubricError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = RubricError::UnknownFramework {
            name: "gdpr".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown compliance framework: 'gdpr'");
        assert!(err.is_config());

        let err = RubricError::missing_field("literature record #2", "title");
        assert!(err.to_string().contains("'title'"));
        assert!(err.to_string().contains("#2"));
        assert!(!err.is_config());
    }
}
