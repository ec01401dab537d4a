// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for the career planner.
//!
//! This module contains pure data and rules with no I/O.
//! Talking to Trello and to the terminal happens through ports (traits)
//! defined in the application layer.
//!
//! - **No I/O**: No filesystem, network, or terminal access
//! - **Explicit schemas**: Every Trello object is a typed struct
//! - **Secrets stay opaque**: [`Credentials`] never prints its values
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    board::{Board, BoardList, Card, Label, Member},
    generation::{GenerationResult, ItemFailure, ItemRef},
    summary::{BoardSummary, CardSummary, LabelSummary, ListSummary},
    template::{BoardTemplate, CardTemplate, LabelTemplate, ListTemplate},
};

pub use error::{CredentialError, DomainError};

pub use value_objects::{
    CredentialField, Credentials, EntityKind, LabelColor, MAX_NAME_LEN, Position, validate_name,
};

pub use validation::DomainValidator;
