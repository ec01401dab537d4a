//! `trello-career-planner edit`: interactive card editing on an existing board.

use tracing::{info, instrument};

use planner_core::{
    application::{BoardEditor, EditSession},
    error::PlannerError,
};

use crate::{
    cli::EditArgs,
    commands::{connect, interrupt_on_ctrl_c},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::terminal_prompter,
};

#[instrument(skip_all)]
pub fn execute(args: EditArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let interrupt = interrupt_on_ctrl_c();
    let session = connect(&args.credentials, config, output, &interrupt)?;
    let mut prompter = terminal_prompter();

    let outcome = BoardEditor::new(&session.api, prompter.as_mut())
        .with_interrupt(interrupt)
        .assume_yes(args.yes)
        .run(args.board_id.as_deref())?;

    info!(
        operations = outcome.operations.len(),
        failed = outcome.failed(),
        "Edit session finished"
    );
    report(&outcome, output)?;

    if outcome.interrupted {
        return Err(PlannerError::Interrupted.into());
    }
    match outcome.failed() {
        0 => Ok(()),
        failed => Err(CliError::EditFailures { failed }),
    }
}

fn report(session: &EditSession, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&session_json(session))?;
        return Ok(());
    }

    let Some(board) = &session.board else {
        output.info("No board selected.")?;
        return Ok(());
    };

    if session.operations.is_empty() {
        output.info(&format!("No changes made to '{}'.", board.name))?;
        return Ok(());
    }

    output.header(&format!("Changes to '{}'", board.name))?;
    for operation in &session.operations {
        output.print(&operation.to_string())?;
    }
    Ok(())
}

fn session_json(session: &EditSession) -> serde_json::Value {
    let operations: Vec<_> = session
        .operations
        .iter()
        .map(|op| {
            serde_json::json!({
                "operation": op.operation.label(),
                "cancelled": op.cancelled,
                "error": op.error.as_ref().map(ToString::to_string),
                "succeeded": op.succeeded(),
                "skipped": op.skipped(),
                "failed": op.failed(),
                "cards": op.outcomes.iter().map(ToString::to_string).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "board": session.board,
        "operations": operations,
        "interrupted": session.interrupted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{
        application::{CardOutcome, EditOperation, OperationReport},
        domain::Board,
    };

    #[test]
    fn json_report_lists_each_operation() {
        let session = EditSession {
            board: Some(Board::new("b1", "Career", None)),
            operations: vec![OperationReport {
                operation: EditOperation::MoveCards,
                outcomes: vec![
                    CardOutcome::Done { card: "C1".into() },
                    CardOutcome::Done { card: "C3".into() },
                ],
                cancelled: false,
                error: None,
            }],
            interrupted: false,
        };

        let json = session_json(&session);
        assert_eq!(json["board"]["id"], "b1");
        assert_eq!(json["operations"][0]["operation"], "Move cards");
        assert_eq!(json["operations"][0]["succeeded"], 2);
        assert_eq!(json["operations"][0]["failed"], 0);
    }
}
