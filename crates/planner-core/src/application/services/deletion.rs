//! Confirmation-gated removal of boards and lists.

use tracing::{info, instrument};

use crate::{
    application::{
        ApiError,
        ports::{Prompter, TrelloApi},
    },
    domain::{Board, BoardList, EntityKind},
    error::PlannerResult,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DeletionOutcome {
    /// Boards are deleted; lists are archived.
    Removed {
        entity: EntityKind,
        id: String,
        name: String,
    },
    Cancelled,
    /// There was nothing to choose from.
    NothingToRemove { entity: EntityKind },
}

enum Pick<T> {
    Chosen(T),
    Empty,
    Cancelled,
}

pub struct BoardDeletion<'a> {
    api: &'a dyn TrelloApi,
    prompter: &'a mut dyn Prompter,
    assume_yes: bool,
}

impl<'a> BoardDeletion<'a> {
    pub fn new(api: &'a dyn TrelloApi, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            api,
            prompter,
            assume_yes: false,
        }
    }

    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Permanently delete a board, chosen by id or interactively.
    #[instrument(skip(self))]
    pub fn delete_board(&mut self, board_id: Option<&str>) -> PlannerResult<DeletionOutcome> {
        let board = match self.find_board(board_id, "Select a board to delete")? {
            Pick::Chosen(board) => board,
            Pick::Empty => return Ok(DeletionOutcome::NothingToRemove { entity: EntityKind::Board }),
            Pick::Cancelled => return Ok(DeletionOutcome::Cancelled),
        };

        let prompt = format!(
            "Permanently delete board '{}'? This cannot be undone.",
            board.name
        );
        if !self.confirmed(&prompt)? {
            return Ok(DeletionOutcome::Cancelled);
        }

        self.api.delete_board(&board.id)?;
        info!(board_id = %board.id, "Board deleted");
        Ok(DeletionOutcome::Removed {
            entity: EntityKind::Board,
            id: board.id,
            name: board.name,
        })
    }

    /// Archive a list. Trello keeps archived lists recoverable from the
    /// board menu.
    #[instrument(skip(self))]
    pub fn delete_list(
        &mut self,
        board_id: Option<&str>,
        list_id: Option<&str>,
    ) -> PlannerResult<DeletionOutcome> {
        let board = match self.find_board(board_id, "Select the board that has the list")? {
            Pick::Chosen(board) => board,
            Pick::Empty => return Ok(DeletionOutcome::NothingToRemove { entity: EntityKind::Board }),
            Pick::Cancelled => return Ok(DeletionOutcome::Cancelled),
        };

        let lists = self.api.board_lists(&board.id)?;
        let list = match list_id {
            Some(id) => find_list(lists, id)?,
            None if lists.is_empty() => {
                self.prompter.notify("This board has no open lists.");
                return Ok(DeletionOutcome::NothingToRemove {
                    entity: EntityKind::List,
                });
            }
            None => {
                let names: Vec<String> = lists.iter().map(|l| l.name.clone()).collect();
                let choice = self.prompter.select("Select a list to archive", &names)?;
                match choice.and_then(|i| lists.into_iter().nth(i)) {
                    Some(list) => list,
                    None => return Ok(DeletionOutcome::Cancelled),
                }
            }
        };

        let prompt = format!("Archive list '{}' on board '{}'?", list.name, board.name);
        if !self.confirmed(&prompt)? {
            return Ok(DeletionOutcome::Cancelled);
        }

        self.api.archive_list(&list.id)?;
        info!(list_id = %list.id, "List archived");
        Ok(DeletionOutcome::Removed {
            entity: EntityKind::List,
            id: list.id,
            name: list.name,
        })
    }

    fn find_board(&mut self, board_id: Option<&str>, prompt: &str) -> PlannerResult<Pick<Board>> {
        if let Some(id) = board_id {
            return self.api.get_board(id).map(Pick::Chosen);
        }
        let boards = self.api.list_boards()?;
        if boards.is_empty() {
            self.prompter.notify("No open boards found.");
            return Ok(Pick::Empty);
        }
        let names: Vec<String> = boards.iter().map(|b| b.name.clone()).collect();
        let choice = self.prompter.select(prompt, &names)?;
        Ok(choice
            .and_then(|i| boards.into_iter().nth(i))
            .map_or(Pick::Cancelled, Pick::Chosen))
    }

    fn confirmed(&mut self, prompt: &str) -> PlannerResult<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        self.prompter.confirm(prompt, false)
    }
}

fn find_list(lists: Vec<BoardList>, id: &str) -> PlannerResult<BoardList> {
    lists.into_iter().find(|l| l.id == id).ok_or_else(|| {
        ApiError::NotFound {
            resource: format!("list {id}"),
        }
        .into()
    })
}
