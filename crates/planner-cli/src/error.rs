//! Error handling for the CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::{error::Error, path::PathBuf};

use owo_colors::OwoColorize;
use thiserror::Error;

use planner_core::error::{ErrorCategory as CoreCategory, PlannerError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from the core or the adapters.
    #[error("{0}")]
    Planner(#[from] PlannerError),

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Refusing to overwrite an existing file.
    #[error("{} already exists", path.display())]
    FileExists { path: PathBuf },

    /// The board exists but some lists, labels, or cards were not created.
    #[error("board created with {failed} failed item(s): {url}")]
    PartialGeneration { url: String, failed: usize },

    /// The board exists but the run was interrupted before finishing.
    #[error("interrupted; the partially built board is at {url}")]
    InterruptedGeneration { url: String },

    /// Some editor operations failed.
    #[error("{failed} edit(s) failed")]
    EditFailures { failed: usize },

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Planner(e) => e.suggestions(),
            Self::Config { .. } => vec![
                "Check the file printed by `trello-career-planner config path`".into(),
                "Run `trello-career-planner init --force` to write a fresh default config".into(),
            ],
            Self::Io { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::FileExists { .. } => vec![
                "Use --force to overwrite".into(),
                "Or choose a different --output path".into(),
            ],
            Self::PartialGeneration { url, .. } => vec![
                format!("Open {url} to add the missing items by hand"),
                "Or delete the board and run `generate` again".into(),
            ],
            Self::InterruptedGeneration { url } => vec![
                format!("Finish the board by hand at {url}"),
                "Or delete it with `trello-career-planner delete board` and start over".into(),
            ],
            Self::EditFailures { .. } => vec!["Run again with -v to see each failed request".into()],
            Self::Cancelled => vec!["No changes were made".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Planner(e) => match e.category() {
                CoreCategory::Credentials | CoreCategory::Configuration => {
                    ErrorCategory::Configuration
                }
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Interrupted => ErrorCategory::Interrupted,
                CoreCategory::Permission | CoreCategory::Network | CoreCategory::Internal => {
                    ErrorCategory::Failure
                }
            },
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Io { .. } | Self::EditFailures { .. } => ErrorCategory::Failure,
            Self::FileExists { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::PartialGeneration { .. } => ErrorCategory::Partial,
            Self::InterruptedGeneration { .. } => ErrorCategory::Interrupted,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category        | Code |
    /// |-----------------|------|
    /// | Failure         |  1   |
    /// | User error      |  2   |
    /// | Not found       |  3   |
    /// | Configuration   |  4   |
    /// | Partial board   |  5   |
    /// | Interrupted     | 130  |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Failure => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Partial => 5,
            ErrorCategory::Interrupted => 130,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`]; no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Machine-readable form for `--output-format json`.
    pub fn to_json(&self) -> serde_json::Value {
        let kind = match self {
            Self::Planner(e) => e.kind().as_str(),
            Self::Config { .. } => "configuration",
            Self::Io { .. } => "io",
            Self::FileExists { .. } => "file_exists",
            Self::PartialGeneration { .. } => "partial_generation",
            Self::InterruptedGeneration { .. } => "interrupted",
            Self::EditFailures { .. } => "edit_failures",
            Self::Cancelled => "cancelled",
        };
        serde_json::json!({
            "error": {
                "kind": kind,
                "message": self.to_string(),
                "exit_code": self.exit_code(),
                "suggestions": self.suggestions(),
            }
        })
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(exit_code = self.exit_code(), "{self}")
            }
            ErrorCategory::Partial | ErrorCategory::Interrupted => {
                tracing::warn!(exit_code = self.exit_code(), "Run incomplete: {self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Failure => {
                tracing::error!(exit_code = self.exit_code(), "{self}")
            }
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {source}");
        }
    }
}

/// Error categories for exit codes and log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// API, network, or system failure.
    Failure,
    /// Invalid input, or the user declined.
    UserError,
    NotFound,
    /// Configuration or credentials.
    Configuration,
    /// A board was created but is incomplete.
    Partial,
    Interrupted,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert I/O errors into [`CliError`] at call-sites
/// with a descriptive context message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::Io {
            message: f().into(),
            source: e,
        })
    }
}
