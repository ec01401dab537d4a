//! # trello-career-planner
//!
//! Generates a Trello board for tech career planning and edits it afterwards.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (file + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success                                  |
//! |  1   | API / system error                       |
//! |  2   | User input error or cancelled            |
//! |  3   | Resource not found                       |
//! |  4   | Configuration or credentials error       |
//! |  5   | Board created, but some items failed     |
//! | 130  | Interrupted                              |

use std::{io::IsTerminal, path::Path, process::ExitCode};

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod progress;
mod prompt;

fn main() -> ExitCode {
    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and are not failures.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(config_file(&cli)) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e:#}");
            eprintln!("Configuration error: {e:#}");
            return ExitCode::from(4);
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    debug!(
        format = ?output.format(),
        color = output.supports_color(),
        "Output configured"
    );
    let global = cli.global.clone();

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, &config, &output) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, &global, &output),
    }
}

/// `init --config FILE` creates FILE, so it need not exist yet.
fn config_file(cli: &Cli) -> Option<&Path> {
    match (&cli.command, cli.global.config.as_deref()) {
        (Commands::Init(_), Some(path)) if !path.exists() => None,
        (_, path) => path,
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, config, output),
        Commands::Edit(args) => commands::edit::execute(args, config, output),
        Commands::Delete(cmd) => commands::delete::execute(cmd, config, output),
        Commands::Verify(args) => commands::verify::execute(args, config, output),
        Commands::SetupHelp => commands::setup_help::execute(output),
        Commands::Template(cmd) => commands::template::execute(cmd, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
        Commands::Init(args) => {
            commands::init::execute(args, cli.global.config.as_deref(), output)
        }
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, global: &GlobalArgs, output: &OutputManager) -> ExitCode {
    err.log();

    if output.is_json() {
        let _ = output.json(&err.to_json());
        return ExitCode::from(err.exit_code());
    }

    let verbose = global.verbose > 0;
    let colored = !global.no_color && std::io::stderr().is_terminal();
    let msg = if colored {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
