//! Declarative board template: the lists, labels, and cards to provision.
//!
//! Templates are plain data. They round-trip through TOML (see
//! `planner_adapters::template`) with this shape:
//!
//! ```toml
//! name = "Tech Career Planning"
//! description = "Weekly sprint board"
//!
//! [[labels]]
//! name = "High Priority"
//! color = "red"
//!
//! [[lists]]
//! name = "Sprint Backlog"
//!
//! [[lists.cards]]
//! name = "Define 1-Year Career Vision"
//! description = "Where do you want to be in a year?"
//! labels = ["High Priority"]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{EntityKind, LabelColor, validate_name},
};

/// Complete definition of a board to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<LabelTemplate>,
    #[serde(default)]
    pub lists: Vec<ListTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTemplate {
    pub name: String,
    pub color: LabelColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListTemplate {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<CardTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Label names; resolved against [`BoardTemplate::labels`] at generation time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl BoardTemplate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            labels: Vec::new(),
            lists: Vec::new(),
        }
    }

    pub fn with_label(mut self, name: impl Into<String>, color: LabelColor) -> Self {
        self.labels.push(LabelTemplate {
            name: name.into(),
            color,
        });
        self
    }

    pub fn with_list(mut self, list: ListTemplate) -> Self {
        self.lists.push(list);
        self
    }

    /// Total number of card definitions across all lists.
    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|l| l.cards.len()).sum()
    }

    /// Check structural rules.
    ///
    /// Undefined label references on cards are deliberately *not* checked
    /// here: they fail the individual card at generation time, not the run.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(EntityKind::Board, &self.name)?;

        if self.lists.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template: self.name.clone(),
            });
        }

        let mut labels = HashSet::new();
        for label in &self.labels {
            let name = validate_name(EntityKind::Label, &label.name)?;
            if !labels.insert(name.clone()) {
                return Err(DomainError::DuplicateLabel { name });
            }
        }

        let mut lists = HashSet::new();
        for list in &self.lists {
            let name = validate_name(EntityKind::List, &list.name)?;
            if !lists.insert(name.clone()) {
                return Err(DomainError::DuplicateList { name });
            }
            for card in &list.cards {
                validate_name(EntityKind::Card, &card.name)?;
            }
        }

        Ok(())
    }
}

impl ListTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_card(mut self, card: CardTemplate) -> Self {
        self.cards.push(card);
        self
    }
}

impl CardTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            labels: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }
}
