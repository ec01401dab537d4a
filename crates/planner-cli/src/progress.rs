//! Progress reporting for `generate`.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{info, warn};

use planner_core::application::ports::{GenerationEvent, GenerationObserver};

/// Shows an `indicatif` bar on an interactive terminal and falls back to
/// one log event per item otherwise.
pub struct GenerationProgress {
    bar: Option<ProgressBar>,
}

impl GenerationProgress {
    pub fn new(interactive: bool) -> Self {
        let bar = interactive.then(|| {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            if let Ok(style) =
                ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("=> "));
            }
            bar
        });
        Self { bar }
    }

    /// Remove the bar before the summary is printed.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    fn step(&self, message: String) {
        if let Some(bar) = &self.bar {
            bar.set_message(message);
            bar.inc(1);
        }
    }
}

impl GenerationObserver for GenerationProgress {
    fn on_event(&self, event: &GenerationEvent<'_>) {
        match event {
            GenerationEvent::Started { total } => {
                if let Some(bar) = &self.bar {
                    bar.set_length(*total as u64);
                }
                info!(total, "Creating board items");
            }
            GenerationEvent::BoardCreated(board) => {
                info!(url = %board.url, "Created board '{}'", board.name);
                self.step(format!("board {}", board.name));
            }
            GenerationEvent::ListCreated(list) => {
                info!("Created list '{}'", list.name);
                self.step(format!("list {}", list.name));
            }
            GenerationEvent::LabelCreated(label) => {
                info!("Created label '{}'", label.name);
                self.step(format!("label {}", label.name));
            }
            GenerationEvent::CardCreated(card) => {
                info!("Created card '{}'", card.name);
                self.step(format!("card {}", card.name));
            }
            GenerationEvent::ItemFailed(failure) => {
                match &self.bar {
                    Some(bar) => bar.suspend(|| {
                        warn!("Could not create {}: {}", failure.item, failure.error);
                    }),
                    None => warn!("Could not create {}: {}", failure.item, failure.error),
                }
                self.step(format!("failed {}", failure.item));
            }
        }
    }
}

impl Drop for GenerationProgress {
    fn drop(&mut self) {
        self.finish();
    }
}
