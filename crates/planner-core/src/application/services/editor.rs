//! Board Editor - interactive card operations on an existing board.
//!
//! The editor is a small state machine:
//!
//! ```text
//! SelectBoard ─▶ MenuLoop ─▶ { AddCard | MoveCards | UpdateCards | DeleteCards } ─▶ MenuLoop
//!      │             │
//!      └─────────────┴──▶ Exit
//! ```
//!
//! Lists and cards are owned by Trello and may change under us, so every
//! operation fetches them right before presenting choices.

use std::fmt;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{CardDraft, CardUpdate, Prompter, TrelloApi},
        services::Interrupt,
    },
    domain::{Board, BoardList, Card, DomainError},
    error::{PlannerError, PlannerResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    SelectBoard,
    MenuLoop,
    Operation(EditOperation),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    AddCard,
    MoveCards,
    UpdateCards,
    DeleteCards,
}

impl EditOperation {
    pub const ALL: [EditOperation; 4] = [
        Self::AddCard,
        Self::MoveCards,
        Self::UpdateCards,
        Self::DeleteCards,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::AddCard => "Add a card",
            Self::MoveCards => "Move cards",
            Self::UpdateCards => "Update cards",
            Self::DeleteCards => "Delete cards",
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one card-level action.
#[derive(Debug, Clone)]
pub enum CardOutcome {
    Done { card: String },
    Skipped { card: String },
    Failed { card: String, error: PlannerError },
}

impl CardOutcome {
    pub fn card(&self) -> &str {
        match self {
            Self::Done { card } | Self::Skipped { card } | Self::Failed { card, .. } => card,
        }
    }
}

impl fmt::Display for CardOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done { card } => write!(f, "ok      {card}"),
            Self::Skipped { card } => write!(f, "skipped {card}"),
            Self::Failed { card, error } => write!(f, "failed  {card}: {error}"),
        }
    }
}

/// What one menu choice did.
#[derive(Debug, Clone)]
pub struct OperationReport {
    pub operation: EditOperation,
    pub outcomes: Vec<CardOutcome>,
    /// The user backed out before anything was changed.
    pub cancelled: bool,
    /// The operation could not start (e.g. fetching lists failed).
    pub error: Option<PlannerError>,
}

impl OperationReport {
    fn new(operation: EditOperation, outcomes: Vec<CardOutcome>) -> Self {
        Self {
            operation,
            outcomes,
            cancelled: false,
            error: None,
        }
    }

    fn cancelled(operation: EditOperation) -> Self {
        Self {
            cancelled: true,
            ..Self::new(operation, Vec::new())
        }
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, CardOutcome::Done { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CardOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, CardOutcome::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&CardOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return write!(f, "{}: {error}", self.operation);
        }
        if self.cancelled {
            return write!(f, "{}: cancelled", self.operation);
        }
        write!(
            f,
            "{}: {} succeeded, {} failed, {} skipped",
            self.operation,
            self.succeeded(),
            self.failed(),
            self.skipped()
        )
    }
}

/// Everything that happened during one editor session.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    /// `None` when no board was selected.
    pub board: Option<Board>,
    pub operations: Vec<OperationReport>,
    pub interrupted: bool,
}

impl EditSession {
    pub fn failed(&self) -> usize {
        self.operations
            .iter()
            .map(|op| op.failed() + usize::from(op.error.is_some()))
            .sum()
    }
}

const EXIT_ITEM: &str = "Exit";

pub struct BoardEditor<'a> {
    api: &'a dyn TrelloApi,
    prompter: &'a mut dyn Prompter,
    interrupt: Interrupt,
    assume_yes: bool,
}

impl<'a> BoardEditor<'a> {
    pub fn new(api: &'a dyn TrelloApi, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            api,
            prompter,
            interrupt: Interrupt::default(),
            assume_yes: false,
        }
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Skip destructive-action confirmations.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Run the state machine until the user exits.
    ///
    /// With `board_id` the board is looked up directly; otherwise the user
    /// picks one of their open boards.
    #[instrument(skip(self))]
    pub fn run(&mut self, board_id: Option<&str>) -> PlannerResult<EditSession> {
        let mut session = EditSession::default();
        let mut state = EditorState::SelectBoard;

        loop {
            if self.interrupt.is_raised() {
                warn!("Interrupted; leaving editor");
                session.interrupted = true;
                return Ok(session);
            }

            state = match state {
                EditorState::SelectBoard => match self.select_board(board_id)? {
                    Some(board) => {
                        info!(board_id = %board.id, "Editing board");
                        self.prompter
                            .notify(&format!("Editing board '{}' ({})", board.name, board.url));
                        session.board = Some(board);
                        EditorState::MenuLoop
                    }
                    None => EditorState::Exit,
                },
                EditorState::MenuLoop => self.menu()?,
                EditorState::Operation(operation) => {
                    let Some(board) = session.board.clone() else {
                        return Err(PlannerError::internal("operation chosen without a board"));
                    };
                    let report = match self.perform(operation, &board) {
                        Ok(report) => report,
                        Err(error @ PlannerError::Interaction { .. }) => return Err(error),
                        Err(error) => {
                            warn!(%operation, %error, "Operation failed");
                            OperationReport {
                                error: Some(error),
                                ..OperationReport::new(operation, Vec::new())
                            }
                        }
                    };
                    self.announce(&report);
                    session.operations.push(report);
                    EditorState::MenuLoop
                }
                EditorState::Exit => return Ok(session),
            };
        }
    }

    fn perform(&mut self, operation: EditOperation, board: &Board) -> PlannerResult<OperationReport> {
        match operation {
            EditOperation::AddCard => self.add_card(board),
            EditOperation::MoveCards => self.move_flow(board),
            EditOperation::UpdateCards => self.update_flow(board),
            EditOperation::DeleteCards => self.delete_flow(board),
        }
    }

    fn announce(&mut self, report: &OperationReport) {
        for outcome in &report.outcomes {
            self.prompter.notify(&format!("  {outcome}"));
        }
        self.prompter.notify(&report.to_string());
    }

    // ── States ──────────────────────────────────────────────────────────

    fn select_board(&mut self, board_id: Option<&str>) -> PlannerResult<Option<Board>> {
        if let Some(id) = board_id {
            return self.api.get_board(id).map(Some);
        }

        let boards = self.api.list_boards()?;
        if boards.is_empty() {
            self.prompter.notify("No open boards found.");
            return Ok(None);
        }
        let names: Vec<String> = boards.iter().map(|b| b.name.clone()).collect();
        let choice = self.prompter.select("Select a board to edit", &names)?;
        Ok(choice.and_then(|i| boards.into_iter().nth(i)))
    }

    fn menu(&mut self) -> PlannerResult<EditorState> {
        let mut items: Vec<String> = EditOperation::ALL
            .iter()
            .map(|op| op.label().to_string())
            .collect();
        items.push(EXIT_ITEM.to_string());

        let choice = self.prompter.select("What would you like to do?", &items)?;
        Ok(choice
            .and_then(|i| EditOperation::ALL.get(i).copied())
            .map_or(EditorState::Exit, EditorState::Operation))
    }

    fn add_card(&mut self, board: &Board) -> PlannerResult<OperationReport> {
        let op = EditOperation::AddCard;
        let Some(list) = self.choose_list(board, "Add the card to which list?")? else {
            return Ok(OperationReport::cancelled(op));
        };
        let Some(name) = self.prompter.input("Card name", false)? else {
            return Ok(OperationReport::cancelled(op));
        };
        let description = self
            .prompter
            .input("Description (optional)", true)?
            .unwrap_or_default();
        if self.interrupt.is_raised() {
            return Ok(OperationReport::cancelled(op));
        }

        let outcome = match CardDraft::new(list.id.as_str(), &name) {
            Ok(draft) => {
                let draft = draft.with_description(&description);
                match self.api.create_card(&draft) {
                    Ok(card) => CardOutcome::Done { card: card.name },
                    Err(error) => CardOutcome::Failed { card: draft.name, error },
                }
            }
            Err(error) => CardOutcome::Failed { card: name, error },
        };
        Ok(OperationReport::new(op, vec![outcome]))
    }

    fn move_flow(&mut self, board: &Board) -> PlannerResult<OperationReport> {
        let op = EditOperation::MoveCards;
        let Some((source, cards)) = self.choose_cards(board, "Move cards from which list?", "Select cards to move")? else {
            return Ok(OperationReport::cancelled(op));
        };
        let Some(destination) = self.choose_list(board, "Move them to which list?")? else {
            return Ok(OperationReport::cancelled(op));
        };
        if destination.id == source.id {
            return Err(DomainError::SameSourceAndDestination.into());
        }
        Ok(OperationReport::new(op, self.move_cards(&cards, &destination)))
    }

    fn update_flow(&mut self, board: &Board) -> PlannerResult<OperationReport> {
        const RENAME: usize = 0;
        const DESCRIBE: usize = 1;
        const ARCHIVE: usize = 2;

        let op = EditOperation::UpdateCards;
        let Some((_, cards)) = self.choose_cards(board, "Update cards in which list?", "Select cards to update")? else {
            return Ok(OperationReport::cancelled(op));
        };
        let actions = ["Rename".to_string(), "Set description".to_string(), "Archive".to_string()];
        let outcomes = match self.prompter.select("What should change?", &actions)? {
            Some(RENAME) => self.rename_cards(&cards)?,
            Some(DESCRIBE) => {
                let Some(text) = self.prompter.input("New description (empty clears it)", true)? else {
                    return Ok(OperationReport::cancelled(op));
                };
                self.update_cards(&cards, &CardUpdate::describe(&text))
            }
            Some(ARCHIVE) => {
                let prompt = format!("Archive {} card(s)?", cards.len());
                if !self.confirmed(&prompt)? {
                    return Ok(OperationReport::cancelled(op));
                }
                self.update_cards(&cards, &CardUpdate::archive())
            }
            _ => return Ok(OperationReport::cancelled(op)),
        };
        Ok(OperationReport::new(op, outcomes))
    }

    fn delete_flow(&mut self, board: &Board) -> PlannerResult<OperationReport> {
        let op = EditOperation::DeleteCards;
        let Some((_, cards)) = self.choose_cards(board, "Delete cards from which list?", "Select cards to delete")? else {
            return Ok(OperationReport::cancelled(op));
        };
        let prompt = format!("Permanently delete {} card(s)? This cannot be undone.", cards.len());
        if !self.confirmed(&prompt)? {
            return Ok(OperationReport::cancelled(op));
        }
        Ok(OperationReport::new(op, self.delete_cards(&cards)))
    }

    // ── Batch actions ───────────────────────────────────────────────────

    /// Move each card independently; one failure does not stop the rest.
    pub fn move_cards(&self, cards: &[Card], destination: &BoardList) -> Vec<CardOutcome> {
        self.each_card(cards, |card| {
            self.api.move_card(&card.id, &destination.id).map(|_| ())
        })
    }

    /// Apply the same update to every card.
    pub fn update_cards(&self, cards: &[Card], update: &CardUpdate) -> Vec<CardOutcome> {
        self.each_card(cards, |card| self.api.update_card(&card.id, update).map(|_| ()))
    }

    pub fn delete_cards(&self, cards: &[Card]) -> Vec<CardOutcome> {
        self.each_card(cards, |card| self.api.delete_card(&card.id))
    }

    fn rename_cards(&mut self, cards: &[Card]) -> PlannerResult<Vec<CardOutcome>> {
        let mut outcomes = Vec::with_capacity(cards.len());
        for card in cards {
            if self.interrupt.is_raised() {
                outcomes.push(CardOutcome::Skipped {
                    card: card.name.clone(),
                });
                continue;
            }
            let prompt = format!("New name for '{}' (empty to skip)", card.name);
            let name = self.prompter.input(&prompt, true)?.unwrap_or_default();
            if name.trim().is_empty() {
                outcomes.push(CardOutcome::Skipped {
                    card: card.name.clone(),
                });
                continue;
            }
            let result = CardUpdate::rename(&name).and_then(|u| self.api.update_card(&card.id, &u));
            outcomes.push(outcome(card, result.map(|_| ())));
        }
        Ok(outcomes)
    }

    fn each_card(&self, cards: &[Card], action: impl Fn(&Card) -> PlannerResult<()>) -> Vec<CardOutcome> {
        cards
            .iter()
            .map(|card| {
                if self.interrupt.is_raised() {
                    CardOutcome::Skipped {
                        card: card.name.clone(),
                    }
                } else {
                    outcome(card, action(card))
                }
            })
            .collect()
    }

    // ── Choices ─────────────────────────────────────────────────────────

    fn choose_list(&mut self, board: &Board, prompt: &str) -> PlannerResult<Option<BoardList>> {
        let lists = self.api.board_lists(&board.id)?;
        if lists.is_empty() {
            self.prompter.notify("This board has no open lists.");
            return Ok(None);
        }
        let names: Vec<String> = lists.iter().map(|l| l.name.clone()).collect();
        let choice = self.prompter.select(prompt, &names)?;
        Ok(choice.and_then(|i| lists.into_iter().nth(i)))
    }

    /// Pick a list, then one or more of its open cards.
    fn choose_cards(
        &mut self,
        board: &Board,
        list_prompt: &str,
        cards_prompt: &str,
    ) -> PlannerResult<Option<(BoardList, Vec<Card>)>> {
        let Some(list) = self.choose_list(board, list_prompt)? else {
            return Ok(None);
        };
        let cards = self.api.list_cards(&list.id)?;
        if cards.is_empty() {
            self.prompter
                .notify(&format!("List '{}' has no open cards.", list.name));
            return Ok(None);
        }

        let names: Vec<String> = cards.iter().map(|c| c.name.clone()).collect();
        let picked = self.prompter.multi_select(cards_prompt, &names)?;
        let selected: Vec<Card> = cards
            .into_iter()
            .enumerate()
            .filter(|(i, _)| picked.contains(i))
            .map(|(_, card)| card)
            .collect();

        if selected.is_empty() {
            self.prompter.notify("No cards selected.");
            return Ok(None);
        }
        Ok(Some((list, selected)))
    }

    fn confirmed(&mut self, prompt: &str) -> PlannerResult<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        self.prompter.confirm(prompt, false)
    }
}

fn outcome(card: &Card, result: PlannerResult<()>) -> CardOutcome {
    match result {
        Ok(()) => CardOutcome::Done {
            card: card.name.clone(),
        },
        Err(error) => {
            warn!(card = %card.name, %error, "Card action failed");
            CardOutcome::Failed {
                card: card.name.clone(),
                error,
            }
        }
    }
}
