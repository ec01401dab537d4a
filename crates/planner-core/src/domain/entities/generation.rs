use std::{collections::HashMap, fmt};

use serde::{Serialize, ser::SerializeStruct};

use crate::{
    domain::entities::{
        board::{Board, BoardList, Card, Label},
        summary::{BoardSummary, CardSummary, LabelSummary, ListSummary},
    },
    error::PlannerError,
};

/// Identifies a template item that failed to materialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemRef {
    List { name: String },
    Label { name: String },
    Card { list: String, name: String },
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List { name } => write!(f, "list '{name}'"),
            Self::Label { name } => write!(f, "label '{name}'"),
            Self::Card { list, name } => write!(f, "card '{name}' in '{list}'"),
        }
    }
}

/// One failed item and why.
#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub item: ItemRef,
    pub error: PlannerError,
}

impl Serialize for ItemFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ItemFailure", 3)?;
        state.serialize_field("item", &self.item)?;
        state.serialize_field("kind", &self.error.kind())?;
        state.serialize_field("message", &self.error.to_string())?;
        state.end()
    }
}

/// Outcome of one generation run.
///
/// Only produced once the board exists, so `board.url` is always available
/// for the user to finish by hand.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub board: Board,
    pub created_lists: Vec<BoardList>,
    pub created_labels: Vec<Label>,
    pub created_cards: Vec<Card>,
    pub failures: Vec<ItemFailure>,
    /// The run stopped early because the user interrupted it.
    pub interrupted: bool,
}

impl GenerationResult {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && !self.interrupted
    }

    /// Failures attributed to cards only.
    pub fn card_failures(&self) -> impl Iterator<Item = &ItemFailure> {
        self.failures
            .iter()
            .filter(|f| matches!(f.item, ItemRef::Card { .. }))
    }

    /// Summarize what was actually created, in creation order.
    pub fn summary(&self, description: &str) -> BoardSummary {
        let label_names: HashMap<&str, &str> = self
            .created_labels
            .iter()
            .map(|l| (l.id.as_str(), l.name.as_str()))
            .collect();

        let lists = self
            .created_lists
            .iter()
            .map(|list| ListSummary {
                name: list.name.clone(),
                cards: self
                    .created_cards
                    .iter()
                    .filter(|c| c.list_id == list.id)
                    .map(|c| CardSummary {
                        name: c.name.clone(),
                        labels: c
                            .label_ids
                            .iter()
                            .filter_map(|id| label_names.get(id.as_str()))
                            .map(|n| n.to_string())
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        BoardSummary {
            board_name: self.board.name.clone(),
            description: description.to_string(),
            labels: self
                .created_labels
                .iter()
                .map(|l| LabelSummary {
                    name: l.name.clone(),
                    color: l.color,
                })
                .collect(),
            lists,
        }
    }
}
