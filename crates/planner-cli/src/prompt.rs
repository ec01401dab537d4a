//! Terminal implementation of the [`Prompter`] port.
//!
//! Backed by `dialoguer` when the `interactive` feature is enabled and both
//! stdin and stderr are terminals. Otherwise every question fails with an
//! interaction error telling the user which flags avoid the prompt.

use console::Term;

use planner_core::{
    application::ports::Prompter,
    error::{PlannerError, PlannerResult},
};

/// Pick the prompter for this process.
#[cfg(feature = "interactive")]
pub fn terminal_prompter() -> Box<dyn Prompter> {
    use std::io::IsTerminal;

    if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
        return Box::new(interactive::DialoguerPrompter::new());
    }
    Box::new(Unavailable)
}

#[cfg(not(feature = "interactive"))]
pub fn terminal_prompter() -> Box<dyn Prompter> {
    Box::new(Unavailable)
}

/// Used when no terminal is attached (pipes, CI) or the build has no
/// `interactive` feature.
pub struct Unavailable;

impl Unavailable {
    fn refuse<T>(prompt: &str) -> PlannerResult<T> {
        Err(PlannerError::Interaction {
            message: format!(
                "cannot ask \"{prompt}\" without an interactive terminal; \
                 pass --board-id/--list-id and --yes instead"
            ),
        })
    }
}

impl Prompter for Unavailable {
    fn select(&mut self, prompt: &str, _items: &[String]) -> PlannerResult<Option<usize>> {
        Self::refuse(prompt)
    }

    fn multi_select(&mut self, prompt: &str, _items: &[String]) -> PlannerResult<Vec<usize>> {
        Self::refuse(prompt)
    }

    fn input(&mut self, prompt: &str, _allow_empty: bool) -> PlannerResult<Option<String>> {
        Self::refuse(prompt)
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> PlannerResult<bool> {
        Self::refuse(prompt)
    }

    fn notify(&mut self, message: &str) {
        let _ = Term::stderr().write_line(message);
    }
}

#[cfg(feature = "interactive")]
mod interactive {
    use std::io;

    use console::Term;
    use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};
    use tracing::debug;

    use planner_core::{
        application::ports::Prompter,
        error::{PlannerError, PlannerResult},
    };

    pub struct DialoguerPrompter {
        theme: ColorfulTheme,
        term: Term,
    }

    impl DialoguerPrompter {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
                term: Term::stderr(),
            }
        }
    }

    /// Esc and Ctrl-C answer "cancel"; anything else is a real failure.
    fn cancelled_or<T>(error: dialoguer::Error, cancelled: T) -> PlannerResult<T> {
        match &error {
            dialoguer::Error::IO(io) if io.kind() == io::ErrorKind::Interrupted => {
                debug!("Prompt interrupted");
                return Ok(cancelled);
            }
            _ => {}
        }
        Err(PlannerError::Interaction {
            message: format!("terminal prompt failed: {error}"),
        })
    }

    impl Prompter for DialoguerPrompter {
        fn select(&mut self, prompt: &str, items: &[String]) -> PlannerResult<Option<usize>> {
            Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(items)
                .default(0)
                .interact_on_opt(&self.term)
                .or_else(|e| cancelled_or(e, None))
        }

        fn multi_select(&mut self, prompt: &str, items: &[String]) -> PlannerResult<Vec<usize>> {
            MultiSelect::with_theme(&self.theme)
                .with_prompt(format!("{prompt} (space to toggle, enter to confirm)"))
                .items(items)
                .interact_on_opt(&self.term)
                .map(Option::unwrap_or_default)
                .or_else(|e| cancelled_or(e, Vec::new()))
        }

        fn input(&mut self, prompt: &str, allow_empty: bool) -> PlannerResult<Option<String>> {
            Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty(allow_empty)
                .interact_text_on(&self.term)
                .map(Some)
                .or_else(|e| cancelled_or(e, None))
        }

        fn confirm(&mut self, prompt: &str, default: bool) -> PlannerResult<bool> {
            Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact_on_opt(&self.term)
                .map(|answer| answer.unwrap_or(false))
                .or_else(|e| cancelled_or(e, false))
        }

        fn notify(&mut self, message: &str) {
            let _ = self.term.write_line(message);
        }
    }
}
