//! `trello-career-planner delete board|list`.

use tracing::instrument;

use planner_core::{
    application::{BoardDeletion, DeletionOutcome, Interrupt},
    domain::EntityKind,
};

use crate::{
    cli::{DeleteBoardArgs, DeleteCommands, DeleteListArgs},
    commands::connect,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::terminal_prompter,
};

pub fn execute(cmd: DeleteCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        DeleteCommands::Board(args) => delete_board(args, config, output),
        DeleteCommands::List(args) => delete_list(args, config, output),
    }
}

#[instrument(skip_all)]
fn delete_board(args: DeleteBoardArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let session = connect(&args.credentials, config, output, &Interrupt::default())?;
    let mut prompter = terminal_prompter();

    let outcome = BoardDeletion::new(&session.api, prompter.as_mut())
        .assume_yes(args.yes)
        .delete_board(args.board_id.as_deref())?;
    report(&outcome, output)
}

#[instrument(skip_all)]
fn delete_list(args: DeleteListArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let session = connect(&args.credentials, config, output, &Interrupt::default())?;
    let mut prompter = terminal_prompter();

    let outcome = BoardDeletion::new(&session.api, prompter.as_mut())
        .assume_yes(args.yes)
        .delete_list(args.board_id.as_deref(), args.list_id.as_deref())?;
    report(&outcome, output)
}

fn report(outcome: &DeletionOutcome, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&outcome_json(outcome))?;
    } else if let DeletionOutcome::Removed { entity, name, .. } = outcome {
        output.success(&removed_message(*entity, name))?;
    }

    match outcome {
        DeletionOutcome::Cancelled => Err(CliError::Cancelled),
        _ => Ok(()),
    }
}

fn removed_message(entity: EntityKind, name: &str) -> String {
    match entity {
        EntityKind::List => format!("List '{name}' archived."),
        _ => format!("Board '{name}' deleted."),
    }
}

fn outcome_json(outcome: &DeletionOutcome) -> serde_json::Value {
    match outcome {
        DeletionOutcome::Removed { entity, id, name } => serde_json::json!({
            "status": if *entity == EntityKind::List { "archived" } else { "deleted" },
            "entity": entity.to_string(),
            "id": id,
            "name": name,
        }),
        DeletionOutcome::Cancelled => serde_json::json!({ "status": "cancelled" }),
        DeletionOutcome::NothingToRemove { entity } => serde_json::json!({
            "status": "nothing_to_remove",
            "entity": entity.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_archived_not_deleted() {
        assert_eq!(removed_message(EntityKind::List, "Backlog"), "List 'Backlog' archived.");
        assert_eq!(removed_message(EntityKind::Board, "Career"), "Board 'Career' deleted.");

        let json = outcome_json(&DeletionOutcome::Removed {
            entity: EntityKind::List,
            id: "l1".into(),
            name: "Backlog".into(),
        });
        assert_eq!(json["status"], "archived");
        assert_eq!(json["id"], "l1");
    }

    #[test]
    fn cancellation_json() {
        assert_eq!(outcome_json(&DeletionOutcome::Cancelled)["status"], "cancelled");
    }
}
