//! Fixtures shared by the service tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{
    application::{
        ApiError,
        ports::Prompter,
        services::{Interrupt, retry::Sleeper},
    },
    domain::{Board, BoardList, Card, Label, LabelColor},
    error::{PlannerError, PlannerResult},
};

pub fn board(id: &str, name: &str) -> Board {
    Board::new(id, name, None)
}

pub fn list(id: &str, board_id: &str, name: &str) -> BoardList {
    BoardList {
        id: id.into(),
        board_id: board_id.into(),
        name: name.into(),
        position: 0.0,
    }
}

pub fn label(id: &str, name: &str, color: LabelColor) -> Label {
    Label {
        id: id.into(),
        board_id: "b1".into(),
        name: name.into(),
        color: Some(color),
    }
}

pub fn card(id: &str, list_id: &str, name: &str) -> Card {
    Card {
        id: id.into(),
        list_id: list_id.into(),
        name: name.into(),
        description: None,
        label_ids: Vec::new(),
        position: 0.0,
        closed: false,
    }
}

pub fn rate_limited(retry_after: Option<Duration>) -> PlannerError {
    ApiError::RateLimited { retry_after }.into()
}

pub fn rejected() -> PlannerError {
    ApiError::Validation {
        status: Some(400),
        detail: "invalid value for name".into(),
    }
    .into()
}

/// Ordered record of API calls made through a mock.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

/// Records requested delays without waiting. Built with [`Self::raising`],
/// it also raises an interrupt as if Ctrl-C arrived mid-wait.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
    raise: Option<Interrupt>,
}

impl RecordingSleeper {
    pub fn raising(interrupt: Interrupt) -> Self {
        Self {
            delays: Arc::default(),
            raise: Some(interrupt),
        }
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration, _interrupt: &Interrupt) {
        self.delays.lock().unwrap().push(duration);
        if let Some(interrupt) = &self.raise {
            interrupt.raise();
        }
    }
}

/// One scripted answer for [`ScriptedPrompter`].
#[derive(Debug, Clone)]
pub enum Reply {
    Select(Option<usize>),
    MultiSelect(Vec<usize>),
    Input(Option<String>),
    Confirm(bool),
}

/// Prompter that answers from a fixed script and records notifications.
///
/// Panics when the next scripted reply does not match the prompt kind, or
/// when the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    pub prompts: Vec<String>,
    pub notices: Vec<String>,
    inputs: usize,
    raise_on_input: Option<(Interrupt, usize)>,
}

impl ScriptedPrompter {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Raise `interrupt` while answering the `nth` input prompt (1-based),
    /// as if Ctrl-C arrived with the prompt open.
    pub fn raising_on_input(mut self, interrupt: Interrupt, nth: usize) -> Self {
        self.raise_on_input = Some((interrupt, nth));
        self
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn next(&mut self, prompt: &str) -> Reply {
        self.prompts.push(prompt.to_string());
        self.replies
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for prompt '{prompt}'"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> PlannerResult<Option<usize>> {
        match self.next(prompt) {
            Reply::Select(choice) => {
                if let Some(index) = choice {
                    assert!(index < items.len(), "select index out of range for '{prompt}'");
                }
                Ok(choice)
            }
            other => panic!("expected select for '{prompt}', script has {other:?}"),
        }
    }

    fn multi_select(&mut self, prompt: &str, _items: &[String]) -> PlannerResult<Vec<usize>> {
        match self.next(prompt) {
            Reply::MultiSelect(choices) => Ok(choices),
            other => panic!("expected multi-select for '{prompt}', script has {other:?}"),
        }
    }

    fn input(&mut self, prompt: &str, _allow_empty: bool) -> PlannerResult<Option<String>> {
        match self.next(prompt) {
            Reply::Input(text) => {
                self.inputs += 1;
                if let Some((interrupt, nth)) = &self.raise_on_input {
                    if *nth == self.inputs {
                        interrupt.raise();
                    }
                }
                Ok(text)
            }
            other => panic!("expected input for '{prompt}', script has {other:?}"),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> PlannerResult<bool> {
        match self.next(prompt) {
            Reply::Confirm(answer) => Ok(answer),
            other => panic!("expected confirm for '{prompt}', script has {other:?}"),
        }
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
