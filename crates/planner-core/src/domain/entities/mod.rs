pub mod board;
pub mod generation;
pub mod summary;
pub mod template;

pub use crate::domain::DomainError;
pub use board::{Board, BoardList, Card, Label, Member};
pub use generation::{GenerationResult, ItemFailure, ItemRef};
pub use summary::{BoardSummary, CardSummary, LabelSummary, ListSummary};
pub use template::{BoardTemplate, CardTemplate, LabelTemplate, ListTemplate};
