//! Trello JSON schemas.
//!
//! Responses are decoded into these structs first and only then converted to
//! domain entities, so a shape mismatch surfaces as one decode error instead
//! of a half-built entity.

use serde::{Deserialize, Serialize};

use planner_core::domain::{Board, BoardList, Card, Label, LabelColor, Member, Position};

// ── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BoardDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

impl From<BoardDto> for Board {
    fn from(dto: BoardDto) -> Self {
        Board::new(dto.id, dto.name, dto.url)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDto {
    pub id: String,
    pub name: String,
    pub id_board: String,
    #[serde(default)]
    pub pos: f64,
    #[serde(default)]
    pub closed: bool,
}

impl From<ListDto> for BoardList {
    fn from(dto: ListDto) -> Self {
        BoardList {
            id: dto.id,
            board_id: dto.id_board,
            name: dto.name,
            position: dto.pos,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// `null` for colorless labels; may be a shade outside the creation
    /// palette (e.g. `green_dark`).
    #[serde(default)]
    pub color: Option<String>,
    pub id_board: String,
}

impl From<LabelDto> for Label {
    fn from(dto: LabelDto) -> Self {
        Label {
            id: dto.id,
            board_id: dto.id_board,
            name: dto.name,
            color: dto.color.and_then(|c| c.parse::<LabelColor>().ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDto {
    pub id: String,
    pub name: String,
    pub id_list: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub id_labels: Vec<String>,
    #[serde(default)]
    pub pos: f64,
    #[serde(default)]
    pub closed: bool,
}

impl From<CardDto> for Card {
    fn from(dto: CardDto) -> Self {
        Card {
            id: dto.id,
            list_id: dto.id_list,
            name: dto.name,
            description: Some(dto.desc).filter(|d| !d.is_empty()),
            label_ids: dto.id_labels,
            position: dto.pos,
            closed: dto.closed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl From<MemberDto> for Member {
    fn from(dto: MemberDto) -> Self {
        Member {
            id: dto.id,
            username: dto.username,
            full_name: dto.full_name,
        }
    }
}

/// Shape of JSON error bodies. Trello also answers with plain text.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<&'a str>,
    /// Suppress Trello's "To Do / Doing / Done" starter lists.
    pub default_lists: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewList<'a> {
    pub name: &'a str,
    pub id_board: &'a str,
    pub pos: Position,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabel<'a> {
    pub name: &'a str,
    pub color: LabelColor,
    pub id_board: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<&'a str>,
    pub id_list: &'a str,
    pub id_labels: &'a [String],
    pub pos: Position,
}

/// `PUT /cards/{id}` body. Absent fields are left unchanged.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_list: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<Position>,
}

#[derive(Debug, Serialize)]
pub struct ClosedFlag {
    pub value: bool,
}
