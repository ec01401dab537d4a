use serde::Serialize;

use crate::domain::value_objects::LabelColor;

/// A Trello board as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl Board {
    /// Build a board, falling back to the canonical short URL when the API
    /// response did not carry one.
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: Option<String>) -> Self {
        let id = id.into();
        let url = url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("https://trello.com/b/{id}"));
        Self {
            id,
            name: name.into(),
            url,
        }
    }
}

/// An ordered column of cards on a board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardList {
    pub id: String,
    pub board_id: String,
    pub name: String,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub id: String,
    pub board_id: String,
    pub name: String,
    /// `None` when Trello reports a color outside the creation palette.
    pub color: Option<LabelColor>,
}

/// A card. Belongs to exactly one list at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: String,
    pub list_id: String,
    pub name: String,
    pub description: Option<String>,
    pub label_ids: Vec<String>,
    pub position: f64,
    /// Archived cards are terminal and never shown in listings.
    pub closed: bool,
}

/// The account behind the current credentials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
}

impl Member {
    /// Full name when set, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}
