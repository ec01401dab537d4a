//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `planner-adapters` crate provides the HTTP client; the CLI provides
//! the terminal prompter and progress observer.

use crate::domain::{
    Board, BoardList, Card, EntityKind, ItemFailure, Label, LabelColor, Member, validate_name,
};
use crate::error::PlannerResult;

// ============================================================================
// Trello
// ============================================================================

/// Port for the Trello REST API.
///
/// Implemented by:
/// - `planner_adapters::trello::TrelloClient` (production)
/// - [`crate::application::Retrying`] (decorator adding bounded retry)
///
/// Every method is exactly one round trip. Errors come back already
/// classified as [`crate::application::ApiError`] inside
/// [`crate::error::PlannerError::Api`].
#[cfg_attr(test, mockall::automock)]
pub trait TrelloApi: Send + Sync {
    /// `GET /members/me`: confirms the credentials and returns their owner.
    fn verify_credentials(&self) -> PlannerResult<Member>;

    fn create_board(&self, draft: &BoardDraft) -> PlannerResult<Board>;

    fn get_board(&self, board_id: &str) -> PlannerResult<Board>;

    /// Open boards of the current member.
    fn list_boards(&self) -> PlannerResult<Vec<Board>>;

    fn delete_board(&self, board_id: &str) -> PlannerResult<()>;

    /// Append a list at the bottom of the board.
    fn create_list(&self, board_id: &str, name: &str) -> PlannerResult<BoardList>;

    /// Open lists of a board, in board order.
    fn board_lists(&self, board_id: &str) -> PlannerResult<Vec<BoardList>>;

    /// Close a list. Trello has no hard delete for lists.
    fn archive_list(&self, list_id: &str) -> PlannerResult<()>;

    fn create_label(&self, board_id: &str, name: &str, color: LabelColor) -> PlannerResult<Label>;

    fn create_card(&self, draft: &CardDraft) -> PlannerResult<Card>;

    /// Open cards of a list, in list order. Archived cards are excluded.
    fn list_cards(&self, list_id: &str) -> PlannerResult<Vec<Card>>;

    fn update_card(&self, card_id: &str, update: &CardUpdate) -> PlannerResult<Card>;

    /// Move a card to the bottom of another list.
    fn move_card(&self, card_id: &str, list_id: &str) -> PlannerResult<Card>;

    fn delete_card(&self, card_id: &str) -> PlannerResult<()>;
}

/// Fields for a new board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardDraft {
    pub name: String,
    pub description: Option<String>,
}

impl BoardDraft {
    pub fn new(name: &str, description: &str) -> PlannerResult<Self> {
        let name = validate_name(EntityKind::Board, name)?;
        let description = Some(description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Ok(Self { name, description })
    }
}

/// Fields for a new card, appended at the bottom of `list_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDraft {
    pub list_id: String,
    pub name: String,
    pub description: Option<String>,
    pub label_ids: Vec<String>,
}

impl CardDraft {
    pub fn new(list_id: impl Into<String>, name: &str) -> PlannerResult<Self> {
        Ok(Self {
            list_id: list_id.into(),
            name: validate_name(EntityKind::Card, name)?,
            description: None,
            label_ids: Vec::new(),
        })
    }

    pub fn with_description(mut self, description: &str) -> Self {
        let description = description.trim();
        self.description = (!description.is_empty()).then(|| description.to_string());
        self
    }

    pub fn with_labels(mut self, label_ids: Vec<String>) -> Self {
        self.label_ids = label_ids;
        self
    }
}

/// Partial card update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub closed: Option<bool>,
}

impl CardUpdate {
    pub fn rename(name: &str) -> PlannerResult<Self> {
        Ok(Self {
            name: Some(validate_name(EntityKind::Card, name)?),
            ..Self::default()
        })
    }

    /// An empty description clears the existing one.
    pub fn describe(description: &str) -> Self {
        Self {
            description: Some(description.trim().to_string()),
            ..Self::default()
        }
    }

    pub fn archive() -> Self {
        Self {
            closed: Some(true),
            ..Self::default()
        }
    }
}

// ============================================================================
// Terminal interaction
// ============================================================================

/// Port for interactive input.
///
/// Implemented by:
/// - `planner-cli`'s `TerminalPrompter` (dialoguer)
/// - a scripted fake in this crate's tests
///
/// `Ok(None)` from `select`/`input` means the user backed out (Esc), which
/// callers treat as "cancel this step", not as an error.
pub trait Prompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> PlannerResult<Option<usize>>;

    /// Zero or more indices into `items`, ascending.
    fn multi_select(&mut self, prompt: &str, items: &[String]) -> PlannerResult<Vec<usize>>;

    fn input(&mut self, prompt: &str, allow_empty: bool) -> PlannerResult<Option<String>>;

    fn confirm(&mut self, prompt: &str, default: bool) -> PlannerResult<bool>;

    /// Show a status line to the user.
    fn notify(&mut self, message: &str);
}

// ============================================================================
// Progress
// ============================================================================

/// Progress notifications emitted by [`crate::application::BoardGenerator`].
#[derive(Debug)]
pub enum GenerationEvent<'a> {
    /// Emitted once before any API call. `total` counts board, lists,
    /// labels, and cards.
    Started { total: usize },
    BoardCreated(&'a Board),
    ListCreated(&'a BoardList),
    LabelCreated(&'a Label),
    CardCreated(&'a Card),
    ItemFailed(&'a ItemFailure),
}

pub trait GenerationObserver {
    fn on_event(&self, event: &GenerationEvent<'_>);
}

impl GenerationObserver for () {
    fn on_event(&self, _event: &GenerationEvent<'_>) {}
}
