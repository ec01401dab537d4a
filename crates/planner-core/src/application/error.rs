//! Classified Trello API failures.
//!
//! The HTTP adapter maps every status code and transport failure onto one of
//! these variants. Messages carry Trello's response text, never request URLs,
//! so credentials in the query string cannot leak through them.

use std::time::Duration;

use thiserror::Error;

use crate::error::ErrorKind;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// 401: the key/token pair was rejected.
    #[error("Trello rejected the credentials: {detail}")]
    CredentialsInvalid { detail: String },

    /// 403: valid credentials without access to the resource.
    #[error("permission denied: {detail}")]
    PermissionDenied { detail: String },

    /// 400/422: the request payload was refused.
    #[error("Trello rejected the request: {detail}")]
    Validation { status: Option<u16>, detail: String },

    /// The response body did not match the expected schema.
    #[error("unexpected response from Trello: {reason}")]
    MalformedResponse { reason: String },

    /// 429.
    #[error("rate limited by Trello")]
    RateLimited { retry_after: Option<Duration> },

    /// 5xx, timeouts, connection failures.
    #[error("network error: {reason}")]
    Transient { reason: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("unexpected HTTP status {status}: {detail}")]
    Unexpected { status: u16, detail: String },

    #[error("giving up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<ApiError> },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CredentialsInvalid { .. } => ErrorKind::CredentialsInvalid,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Validation { .. } | Self::MalformedResponse { .. } => ErrorKind::ValidationError,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Transient { .. } => ErrorKind::TransientNetworkError,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unexpected { .. } => ErrorKind::Internal,
            Self::RetriesExhausted { last, .. } => last.kind(),
        }
    }

    /// Rate limits and transient network failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Transient { .. })
    }

    /// Server-requested wait before the next attempt, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CredentialsInvalid { .. } => vec![
                "Check TRELLO_API_KEY and TRELLO_TOKEN".into(),
                "Tokens can expire; generate a new one at https://trello.com/app-key".into(),
                "Run `trello-career-planner verify` to test your credentials".into(),
            ],
            Self::PermissionDenied { .. } => vec![
                "Make sure the token was granted read and write access".into(),
                "Check that your account is a member of the board".into(),
            ],
            Self::NotFound { .. } => vec![
                "Check the ID; run `trello-career-planner edit` without --board-id to pick from a list"
                    .into(),
            ],
            Self::RateLimited { .. } => vec!["Wait a minute and try again".into()],
            Self::Transient { .. } => vec![
                "Check your internet connection".into(),
                "Trello may be having problems; try again shortly".into(),
            ],
            Self::RetriesExhausted { last, .. } => last.suggestions(),
            Self::Validation { .. } | Self::MalformedResponse { .. } | Self::Unexpected { .. } => {
                vec!["Run again with -vv for request details".into()]
            }
        }
    }
}
