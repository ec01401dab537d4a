use std::fmt;

use serde::Serialize;

use crate::domain::{entities::template::BoardTemplate, value_objects::LabelColor};

const DESCRIPTION_PREVIEW_CHARS: usize = 80;

/// Structural summary of a board: what exists (or would exist) on it.
///
/// Produced by dry-run planning and by a finished generation run, so the two
/// can be compared directly. Rendering via `Display` is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSummary {
    pub board_name: String,
    pub description: String,
    pub labels: Vec<LabelSummary>,
    pub lists: Vec<ListSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSummary {
    pub name: String,
    pub color: Option<LabelColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSummary {
    pub name: String,
    pub cards: Vec<CardSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub name: String,
    pub labels: Vec<String>,
}

impl BoardSummary {
    /// Everything a fully successful run of `template` would create.
    pub fn from_template(template: &BoardTemplate, name_override: Option<&str>) -> Self {
        Self {
            board_name: name_override.unwrap_or(template.name.as_str()).to_string(),
            description: template.description.clone(),
            labels: template
                .labels
                .iter()
                .map(|l| LabelSummary {
                    name: l.name.clone(),
                    color: Some(l.color),
                })
                .collect(),
            lists: template
                .lists
                .iter()
                .map(|l| ListSummary {
                    name: l.name.clone(),
                    cards: l
                        .cards
                        .iter()
                        .map(|c| CardSummary {
                            name: c.name.clone(),
                            labels: c.labels.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|l| l.cards.len()).sum()
    }
}

impl fmt::Display for BoardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board: {}", self.board_name)?;
        if !self.description.is_empty() {
            writeln!(f, "Description: {}", preview(&self.description))?;
        }

        writeln!(f)?;
        writeln!(f, "Labels ({}):", self.labels.len())?;
        for label in &self.labels {
            match label.color {
                Some(color) => writeln!(f, "  - {} ({color})", label.name)?,
                None => writeln!(f, "  - {}", label.name)?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Lists ({}):", self.lists.len())?;
        for list in &self.lists {
            writeln!(f, "  {} ({} cards)", list.name, list.cards.len())?;
            for card in &list.cards {
                if card.labels.is_empty() {
                    writeln!(f, "    - {}", card.name)?;
                } else {
                    writeln!(f, "    - {} [{}]", card.name, card.labels.join(", "))?;
                }
            }
        }

        writeln!(f)?;
        write!(
            f,
            "Total: {} lists, {} labels, {} cards",
            self.lists.len(),
            self.labels.len(),
            self.card_count()
        )
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}
