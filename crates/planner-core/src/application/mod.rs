//! Application layer for the career planner.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (generate, edit, delete, retry)
//! - **Ports**: Interface definitions (traits) for Trello and the terminal
//! - **Errors**: Classified API failures
//!
//! Business rules (template structure, names, credentials format) live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BoardDeletion, BoardEditor, BoardGenerator, CardOutcome, DeletionOutcome, EditOperation,
    EditSession, EditorState, Interrupt, OperationReport, RetryPolicy, Retrying, Sleeper,
    ThreadSleeper,
};

pub use ports::{
    BoardDraft, CardDraft, CardUpdate, GenerationEvent, GenerationObserver, Prompter, TrelloApi,
};

pub use error::ApiError;
