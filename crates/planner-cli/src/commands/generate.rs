//! Implementation of `trello-career-planner generate`.
//!
//! Responsibility: pick the template and board name, call the core
//! generator, and display results. No business logic lives here.

use tracing::{info, instrument};

use planner_adapters::{builtin_template, load_template};
use planner_core::{
    application::BoardGenerator,
    domain::{BoardTemplate, GenerationResult},
};

use crate::{
    cli::GenerateArgs,
    commands::{connect, interrupt_on_ctrl_c},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::GenerationProgress,
};

/// Execute `generate`.
///
/// 1. Load the template (file or built-in)
/// 2. `--dry-run`: print the plan and stop, no credentials needed
/// 3. Resolve and verify credentials
/// 4. Create board, lists, labels, cards
/// 5. Report what was created and what failed
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let template = resolve_template(&args)?;
    let name = board_name(&args, config);

    if args.dry_run {
        let plan = BoardGenerator::plan(&template, name)?;
        if output.is_json() {
            output.json(&plan)?;
        } else {
            output.header("Dry run: nothing will be created")?;
            output.print("")?;
            output.print(&plan.to_string())?;
        }
        return Ok(());
    }

    let interrupt = interrupt_on_ctrl_c();
    let session = connect(&args.credentials, config, output, &interrupt)?;
    output.info(&format!(
        "Authenticated as {}",
        session.member.display_name()
    ))?;

    let progress = GenerationProgress::new(output.is_interactive());
    output.header(&format!(
        "Creating '{}'...",
        name.unwrap_or(template.name.as_str())
    ))?;

    let result = BoardGenerator::new(&session.api)
        .with_observer(&progress)
        .with_interrupt(interrupt)
        .generate(&template, name);
    progress.finish();
    let result = result?;

    info!(
        board_id = %result.board.id,
        failures = result.failures.len(),
        interrupted = result.interrupted,
        "Generation finished"
    );

    report(&result, &template, output)?;

    if result.interrupted {
        return Err(CliError::InterruptedGeneration {
            url: result.board.url.clone(),
        });
    }
    if !result.failures.is_empty() {
        return Err(CliError::PartialGeneration {
            url: result.board.url.clone(),
            failed: result.failures.len(),
        });
    }
    Ok(())
}

/// `--name` beats `board.default_name`, which beats the template's own name.
fn board_name<'a>(args: &'a GenerateArgs, config: &'a AppConfig) -> Option<&'a str> {
    args.name
        .as_deref()
        .or(config.board.default_name.as_deref())
}

fn resolve_template(args: &GenerateArgs) -> CliResult<BoardTemplate> {
    match &args.template {
        Some(path) => {
            info!(path = %path.display(), "Loading template");
            Ok(load_template(path)?)
        }
        None => Ok(builtin_template()),
    }
}

fn report(result: &GenerationResult, template: &BoardTemplate, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(result)?;
        return Ok(());
    }

    output.print("")?;
    if result.is_complete() {
        output.success("Board created successfully!")?;
    } else if result.interrupted {
        output.warning("Stopped before the board was finished.")?;
    } else {
        output.warning("Board created, but some items failed.")?;
    }
    output.print(&format!("  Name:   {}", result.board.name))?;
    output.print(&format!("  URL:    {}", result.board.url))?;
    output.print(&format!(
        "  Lists:  {}/{}",
        result.created_lists.len(),
        template.lists.len()
    ))?;
    output.print(&format!(
        "  Labels: {}/{}",
        result.created_labels.len(),
        template.labels.len()
    ))?;
    output.print(&format!(
        "  Cards:  {}/{}",
        result.created_cards.len(),
        template.card_count()
    ))?;

    if !result.failures.is_empty() {
        output.print("")?;
        output.print("Failed items:")?;
        for failure in &result.failures {
            output.print(&format!("  - {}: {}", failure.item, failure.error))?;
        }
    }
    Ok(())
}
