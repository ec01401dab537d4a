//! Value objects shared by the board entities and the template model.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::error::{CredentialError, DomainError};

// ============================================================================
// EntityKind
// ============================================================================

/// The four Trello object kinds this tool creates or edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Board,
    List,
    Label,
    Card,
}

impl EntityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::List => "list",
            Self::Label => "label",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LabelColor
// ============================================================================

/// Label colors accepted by Trello when creating a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Yellow,
    Purple,
    Blue,
    Red,
    Green,
    Orange,
    Black,
    Sky,
    Pink,
    Lime,
}

impl LabelColor {
    /// Every color in the palette, in Trello's display order.
    pub const ALL: [LabelColor; 10] = [
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Red,
        Self::Purple,
        Self::Blue,
        Self::Sky,
        Self::Lime,
        Self::Pink,
        Self::Black,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Black => "black",
            Self::Sky => "sky",
            Self::Pink => "pink",
            Self::Lime => "lime",
        }
    }
}

impl FromStr for LabelColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownLabelColor(s.to_string()))
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Position
// ============================================================================

/// Where a list or card lands inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Position {
    Top,
    #[default]
    Bottom,
    Exact(f64),
}

impl Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Top => serializer.serialize_str("top"),
            Self::Bottom => serializer.serialize_str("bottom"),
            Self::Exact(pos) => serializer.serialize_f64(*pos),
        }
    }
}

// ============================================================================
// Names
// ============================================================================

/// Trello rejects names longer than this.
pub const MAX_NAME_LEN: usize = 16_384;

/// Validate and normalise a user- or template-supplied object name.
pub fn validate_name(entity: EntityKind, name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyName { entity });
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::NameTooLong {
            entity,
            max: MAX_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// Credentials
// ============================================================================

/// Which half of the credential pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    ApiKey,
    Token,
}

impl CredentialField {
    /// Environment variable that supplies this field.
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::ApiKey => "TRELLO_API_KEY",
            Self::Token => "TRELLO_TOKEN",
        }
    }

    /// CLI flag that supplies this field.
    pub const fn flag(self) -> &'static str {
        match self {
            Self::ApiKey => "--api-key",
            Self::Token => "--token",
        }
    }

    const fn min_len(self) -> usize {
        match self {
            Self::ApiKey => 16,
            Self::Token => 32,
        }
    }

    const fn typical_len(self) -> usize {
        match self {
            Self::ApiKey => 32,
            Self::Token => 64,
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey => f.write_str("API key"),
            Self::Token => f.write_str("token"),
        }
    }
}

/// Trello API key and token.
///
/// `Debug` is redacted; the raw values are only reachable through
/// [`Credentials::api_key`] and [`Credentials::token`], which the HTTP adapter
/// uses to build query parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    token: String,
}

impl Credentials {
    /// Build a credential pair. Both halves must be non-empty after trimming.
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Result<Self, CredentialError> {
        let api_key = api_key.into().trim().to_string();
        let token = token.into().trim().to_string();

        if api_key.is_empty() {
            return Err(CredentialError::Missing {
                field: CredentialField::ApiKey,
            });
        }
        if token.is_empty() {
            return Err(CredentialError::Missing {
                field: CredentialField::Token,
            });
        }

        Ok(Self { api_key, token })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Check the values look like real Trello credentials.
    ///
    /// Keys are 32 and tokens 64 (or more) ASCII alphanumerics. This is a
    /// format check only; [`crate::application::ports::TrelloApi::verify_credentials`]
    /// asks the API whether they are accepted.
    pub fn validate_format(&self) -> Result<(), CredentialError> {
        check_field(CredentialField::ApiKey, &self.api_key)?;
        check_field(CredentialField::Token, &self.token)
    }
}

fn check_field(field: CredentialField, value: &str) -> Result<(), CredentialError> {
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CredentialError::Malformed {
            field,
            reason: "contains characters other than letters and digits".into(),
        });
    }
    if value.len() < field.min_len() {
        return Err(CredentialError::Malformed {
            field,
            reason: format!(
                "appears too short; Trello values are typically {} characters",
                field.typical_len()
            ),
        });
    }
    Ok(())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}
