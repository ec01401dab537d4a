//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

pub const BIN_NAME: &str = "trello-career-planner";

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = BIN_NAME,
    bin_name = BIN_NAME,
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a Trello board for tech career planning",
    long_about = "Creates a weekly-sprint Trello board for tech career planning \
                  (lists, labels, and starter cards) and helps you edit it afterwards.",
    after_help = "EXAMPLES:\n\
        \x20 trello-career-planner generate\n\
        \x20 trello-career-planner generate --name \"My Career Plan 2025\"\n\
        \x20 trello-career-planner generate --dry-run\n\
        \x20 trello-career-planner verify --env-file ~/.trello.env\n\
        \x20 trello-career-planner edit\n\
        \x20 trello-career-planner delete board --board-id 5f1a2b3c",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the career planning board.
    #[command(
        visible_alias = "gen",
        about = "Create the career planning board",
        after_help = "EXAMPLES:\n\
            \x20 trello-career-planner generate\n\
            \x20 trello-career-planner generate --name \"Career 2025\" --api-key KEY --token TOKEN\n\
            \x20 trello-career-planner generate --template my-board.toml --dry-run"
    )]
    Generate(GenerateArgs),

    /// Interactively edit cards on an existing board.
    #[command(
        about = "Bulk-edit cards on an existing board",
        after_help = "EXAMPLES:\n\
            \x20 trello-career-planner edit\n\
            \x20 trello-career-planner edit --board-id 5f1a2b3c"
    )]
    Edit(EditArgs),

    /// Delete a board or archive a list.
    #[command(about = "Delete a board or archive a list", subcommand)]
    Delete(DeleteCommands),

    /// Check that the credentials are accepted by Trello.
    #[command(
        about = "Verify Trello credentials",
        after_help = "EXAMPLES:\n\
            \x20 trello-career-planner verify\n\
            \x20 trello-career-planner verify --env-file ./secrets.env"
    )]
    Verify(VerifyArgs),

    /// Explain how to obtain and configure an API key and token.
    #[command(about = "Show credential setup instructions")]
    SetupHelp,

    /// Work with board template files.
    #[command(about = "Board template files", subcommand)]
    Template(TemplateCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 trello-career-planner completions bash > ~/.local/share/bash-completion/completions/trello-career-planner\n\
            \x20 trello-career-planner completions zsh  > ~/.zfunc/_trello-career-planner"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(about = "Configuration management", subcommand)]
    Config(ConfigCommands),

    /// Write a default configuration file.
    #[command(about = "Initialise configuration")]
    Init(InitArgs),
}

// ── credentials ───────────────────────────────────────────────────────────────

/// Credential sources shared by every command that talks to Trello.
///
/// Each value falls back to `TRELLO_API_KEY` / `TRELLO_TOKEN` and then to the
/// secrets file.
#[derive(Debug, Clone, Default, Args)]
pub struct CredentialArgs {
    /// Trello API key.
    #[arg(
        short = 'k',
        long = "api-key",
        value_name = "KEY",
        help = "Trello API key (default: TRELLO_API_KEY)"
    )]
    pub api_key: Option<String>,

    /// Trello API token.
    #[arg(
        short = 't',
        long = "token",
        value_name = "TOKEN",
        help = "Trello API token (default: TRELLO_TOKEN)"
    )]
    pub token: Option<String>,

    /// Secrets file in `.env` format.
    #[arg(
        short = 'e',
        long = "env-file",
        value_name = "FILE",
        help = "Path to a .env file with credentials (default: ./.env)"
    )]
    pub env_file: Option<PathBuf>,
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Board name; defaults to `board.default_name` or the template's name.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Custom board name")]
    pub name: Option<String>,

    /// Use a TOML template instead of the built-in board.
    #[arg(
        long = "template",
        value_name = "FILE",
        help = "Board template file (see `template export`)"
    )]
    pub template: Option<PathBuf>,

    /// Show what would be created without calling Trello.
    #[arg(long = "dry-run", help = "Show what would be created without making API calls")]
    pub dry_run: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

// ── edit ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Board to edit; prompts when omitted.
    #[arg(long = "board-id", value_name = "ID", help = "Board ID to edit")]
    pub board_id: Option<String>,

    /// Skip confirmation prompts for archive and delete.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation prompts")]
    pub yes: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

// ── delete ────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum DeleteCommands {
    /// Permanently delete a board.
    #[command(after_help = "EXAMPLES:\n\
        \x20 trello-career-planner delete board\n\
        \x20 trello-career-planner delete board --board-id 5f1a2b3c --yes")]
    Board(DeleteBoardArgs),

    /// Archive a list on a board.
    #[command(after_help = "EXAMPLES:\n\
        \x20 trello-career-planner delete list --board-id 5f1a2b3c")]
    List(DeleteListArgs),
}

#[derive(Debug, Args)]
pub struct DeleteBoardArgs {
    /// Board to delete; prompts when omitted.
    #[arg(long = "board-id", value_name = "ID", help = "Board ID to delete")]
    pub board_id: Option<String>,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt")]
    pub yes: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Debug, Args)]
pub struct DeleteListArgs {
    #[arg(long = "board-id", value_name = "ID", help = "Board that holds the list")]
    pub board_id: Option<String>,

    #[arg(long = "list-id", value_name = "ID", help = "List ID to archive")]
    pub list_id: Option<String>,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt")]
    pub yes: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

// ── verify ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

// ── template ──────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// Write the built-in board as a TOML template.
    Export {
        /// Destination file; stdout when omitted.
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `retry.max_attempts`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── tests ─────────────────────────────────────────────────────────────────────
