//! Unified error handling for the planner core.
//!
//! [`PlannerError`] wraps domain, API, and credential errors. Every error maps
//! onto one [`ErrorKind`], which is what reports and exit codes are built from.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::application::ApiError;
use crate::domain::{CredentialError, DomainError};

/// Stable classification of every failure the tool can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    CredentialsMissing,
    CredentialsInvalid,
    ValidationError,
    RateLimited,
    TransientNetworkError,
    NotFound,
    PermissionDenied,
    UnknownEntityReference,
    Interrupted,
    Configuration,
    Internal,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CredentialsMissing => "credentials_missing",
            Self::CredentialsInvalid => "credentials_invalid",
            Self::ValidationError => "validation_error",
            Self::RateLimited => "rate_limited",
            Self::TransientNetworkError => "transient_network_error",
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::UnknownEntityReference => "unknown_entity_reference",
            Self::Interrupted => "interrupted",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root error type for planner operations.
#[derive(Debug, Error, Clone)]
pub enum PlannerError {
    /// Template or input rule violations.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A classified failure from the Trello API.
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Credentials(#[from] CredentialError),

    /// A template file could not be read, parsed, or written.
    #[error("template file {}: {reason}", path.display())]
    TemplateFile { path: PathBuf, reason: String },

    /// The user pressed Ctrl-C.
    #[error("operation interrupted")]
    Interrupted,

    /// Terminal interaction failed or was aborted.
    #[error("{message}")]
    Interaction { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PlannerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => e.kind(),
            Self::Api(e) => e.kind(),
            Self::Credentials(e) => e.kind(),
            Self::TemplateFile { .. } => ErrorKind::ValidationError,
            Self::Interrupted => ErrorKind::Interrupted,
            Self::Interaction { .. } => ErrorKind::ValidationError,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            ErrorKind::CredentialsMissing | ErrorKind::CredentialsInvalid => {
                ErrorCategory::Credentials
            }
            ErrorKind::ValidationError | ErrorKind::UnknownEntityReference => {
                ErrorCategory::Validation
            }
            ErrorKind::NotFound => ErrorCategory::NotFound,
            ErrorKind::PermissionDenied => ErrorCategory::Permission,
            ErrorKind::RateLimited | ErrorKind::TransientNetworkError => ErrorCategory::Network,
            ErrorKind::Interrupted => ErrorCategory::Interrupted,
            ErrorKind::Configuration => ErrorCategory::Configuration,
            ErrorKind::Internal => ErrorCategory::Internal,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Api(e) => e.suggestions(),
            Self::Credentials(e) => e.suggestions(),
            Self::TemplateFile { .. } => vec![
                "Run `trello-career-planner template export` for a template to start from".into(),
                "Check the TOML syntax and that every list and label has a name".into(),
            ],
            Self::Interrupted => vec![
                "Anything created before the interrupt is still on the board".into(),
                "Re-run the command to try again".into(),
            ],
            Self::Interaction { .. } => vec!["Run the command from an interactive terminal".into()],
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `trello-career-planner config path` to find the config file".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in trello-career-planner".into()],
        }
    }

    /// Retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_retryable())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Credentials,
    Validation,
    NotFound,
    Permission,
    Network,
    Interrupted,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::CredentialField;

    #[test]
    fn kinds_pass_through_wrappers() {
        let err: PlannerError = ApiError::RateLimited { retry_after: None }.into();
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert!(err.is_retryable());

        let err: PlannerError = CredentialError::Missing {
            field: CredentialField::Token,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::CredentialsMissing);
        assert_eq!(err.category(), ErrorCategory::Credentials);
        assert!(!err.is_retryable());
    }

    #[test]
    fn exhausted_retries_report_the_last_cause() {
        let err: PlannerError = ApiError::RetriesExhausted {
            attempts: 3,
            last: Box::new(ApiError::RateLimited {
                retry_after: Some(Duration::from_secs(1)),
            }),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("3 attempts"));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::UnknownEntityReference).unwrap();
        assert_eq!(json, "\"unknown_entity_reference\"");
        assert_eq!(
            ErrorKind::TransientNetworkError.to_string(),
            "transient_network_error"
        );
    }
}
