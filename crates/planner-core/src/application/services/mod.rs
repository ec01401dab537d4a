//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: generate a board, edit one, delete one, and retry
//! API calls that hit rate limits.

pub mod deletion;
pub mod editor;
pub mod generator;
pub mod interrupt;
pub mod retry;

#[cfg(test)]
pub(crate) mod test_support;

pub use deletion::{BoardDeletion, DeletionOutcome};
pub use editor::{BoardEditor, CardOutcome, EditOperation, EditSession, EditorState, OperationReport};
pub use generator::BoardGenerator;
pub use interrupt::Interrupt;
pub use retry::{RetryPolicy, Retrying, Sleeper, ThreadSleeper};
