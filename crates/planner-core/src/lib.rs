//! Planner Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Trello
//! career planner, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      planner-cli (trello-career-planner) │
//! │     (Commands, Prompter, Progress)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (BoardGenerator, BoardEditor, Deletion) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (TrelloApi, Prompter, Observer)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    planner-adapters (Infrastructure)    │
//! │ (TrelloClient, CredentialResolver, ...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use planner_core::prelude::*;
//!
//! # fn run(api: &dyn TrelloApi, template: &BoardTemplate) -> PlannerResult<()> {
//! let generator = BoardGenerator::new(api);
//! let result = generator.generate(template, None)?;
//! println!("{}", result.board.url);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApiError, BoardDeletion, BoardEditor, BoardGenerator, Interrupt, RetryPolicy, Retrying,
        ports::{GenerationEvent, GenerationObserver, Prompter, TrelloApi},
    };
    pub use crate::domain::{
        Board, BoardSummary, BoardTemplate, Credentials, GenerationResult, LabelColor,
    };
    pub use crate::error::{ErrorKind, PlannerError, PlannerResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
