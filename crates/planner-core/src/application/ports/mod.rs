//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `planner-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TrelloApi`: One method per Trello resource action
//!   - `Prompter`: Interactive terminal input for the editor and deletion flows
//!   - `GenerationObserver`: Progress events while a board is generated
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    BoardDraft, CardDraft, CardUpdate, GenerationEvent, GenerationObserver, Prompter, TrelloApi,
};

#[cfg(test)]
pub use output::MockTrelloApi;
