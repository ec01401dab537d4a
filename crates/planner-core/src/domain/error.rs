// ============================================================================
// domain/error.rs - DOMAIN AND CREDENTIAL ERRORS
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::value_objects::{CredentialField, EntityKind};
use crate::error::ErrorKind;

/// Rule violations in templates, drafts, and name resolution.
///
/// All errors are:
/// - Cloneable (collected into generation reports)
/// - Classifiable (mapped onto [`ErrorKind`])
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("{entity} name cannot be empty")]
    EmptyName { entity: EntityKind },

    #[error("{entity} name exceeds {max} characters")]
    NameTooLong { entity: EntityKind, max: usize },

    #[error("unknown label color '{0}'")]
    UnknownLabelColor(String),

    #[error("label '{name}' is defined more than once")]
    DuplicateLabel { name: String },

    #[error("list '{name}' is defined more than once")]
    DuplicateList { name: String },

    #[error("template '{template}' defines no lists")]
    EmptyTemplate { template: String },

    #[error("source and destination list are the same")]
    SameSourceAndDestination,

    // ========================================================================
    // Reference Errors
    // ========================================================================
    #[error("card '{card}' references undefined label '{label}'")]
    UnknownLabel { card: String, label: String },

    #[error("card '{card}' belongs to list '{list}', which was not created")]
    UnresolvedList { card: String, list: String },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownLabel { .. } | Self::UnresolvedList { .. } => {
                ErrorKind::UnknownEntityReference
            }
            _ => ErrorKind::ValidationError,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownLabelColor(_) => vec![
                "Valid colors: green, yellow, orange, red, purple, blue, sky, lime, pink, black"
                    .into(),
            ],
            Self::UnknownLabel { label, .. } => vec![
                format!("Add a [[labels]] entry named '{label}' to the template"),
                "Or remove the label from the card definition".into(),
            ],
            Self::UnresolvedList { list, .. } => vec![
                format!("Creating list '{list}' failed; see the failure reported for it"),
                "Re-run the generator once the cause is fixed".into(),
            ],
            Self::DuplicateLabel { .. } | Self::DuplicateList { .. } => {
                vec!["Names must be unique within a template".into()]
            }
            _ => vec!["Check the template definition".into()],
        }
    }
}

/// Failures while resolving or checking Trello credentials.
///
/// Variants carry the field name or file path, never the secret value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CredentialError {
    #[error("Trello {field} not found")]
    Missing { field: CredentialField },

    #[error("Trello {field} {reason}")]
    Malformed {
        field: CredentialField,
        reason: String,
    },

    #[error("environment file not found: {}", path.display())]
    SecretsFileNotFound { path: PathBuf },

    #[error("cannot read environment file {}: {reason}", path.display())]
    SecretsFileUnreadable { path: PathBuf, reason: String },
}

impl CredentialError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed { .. } => ErrorKind::CredentialsInvalid,
            _ => ErrorKind::CredentialsMissing,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Missing { field } => vec![
                format!(
                    "Set {} in the environment or a .env file, or pass {}",
                    field.env_var(),
                    field.flag()
                ),
                "Get your API key and token at: https://trello.com/app-key".into(),
                "Run `trello-career-planner setup-help` for step-by-step instructions".into(),
            ],
            Self::Malformed { field, .. } => vec![
                format!("Double-check the {field} you copied from https://trello.com/app-key"),
                "Make sure no quotes or whitespace were pasted along with it".into(),
            ],
            Self::SecretsFileNotFound { path } | Self::SecretsFileUnreadable { path, .. } => vec![
                format!("Check that {} exists and is readable", path.display()),
                "Run `trello-career-planner setup-help` for the expected file format".into(),
            ],
        }
    }
}
