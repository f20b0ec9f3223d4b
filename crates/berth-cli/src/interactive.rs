//! Terminal-facing adapters: dialoguer prompts and an indicatif spinner.
//!
//! Both write to stderr so stdout carries only command results.

use std::{sync::Mutex, time::Duration};

use console::{Term, style};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};

use berth_core::{
    application::{
        ApplicationError,
        ports::{ProgressOutcome, ProgressReporter, Prompter, TextValidator},
    },
    error::BerthResult,
};

// ── Prompter ──────────────────────────────────────────────────────────────────

/// Prompter backed by dialoguer. The help text is printed dimmed above each
/// question.
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    fn show_help(&self, help: &str) {
        if help.is_empty() {
            return;
        }
        // Help is decoration; a failed write must not fail the prompt.
        let _ = Term::stderr().write_line(&style(help).dim().to_string());
    }
}

impl Prompter for DialoguerPrompter {
    fn select_one(&self, message: &str, help: &str, options: &[String]) -> BerthResult<String> {
        self.show_help(help);
        let index = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(options)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        options.get(index).cloned().ok_or_else(|| {
            ApplicationError::Prompt {
                reason: format!("selection {index} is out of range"),
            }
            .into()
        })
    }

    fn get_text(
        &self,
        message: &str,
        help: &str,
        default: &str,
        validator: Option<TextValidator>,
    ) -> BerthResult<String> {
        self.show_help(help);
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        if let Some(validate) = validator {
            input = input.validate_with(move |answer: &String| validate(answer));
        }
        input.interact_text().map_err(prompt_error)
    }
}

fn prompt_error(err: dialoguer::Error) -> berth_core::error::BerthError {
    ApplicationError::Prompt {
        reason: err.to_string(),
    }
    .into()
}

// ── Progress ──────────────────────────────────────────────────────────────────

const TICK: Duration = Duration::from_millis(80);

/// Spinner while a step runs, then a `✓`/`✗` line with the final message.
pub struct SpinnerProgress {
    quiet: bool,
    no_color: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new(quiet: bool, no_color: bool) -> Self {
        Self {
            quiet,
            no_color,
            bar: Mutex::new(None),
        }
    }

    fn final_line(&self, outcome: ProgressOutcome, message: &str) -> String {
        let (symbol, text) = match outcome {
            ProgressOutcome::Success => ("\u{2713}", style(message).green()),
            ProgressOutcome::Failure => ("\u{2717}", style(message).red()),
        };
        if self.no_color {
            format!("{symbol} {message}")
        } else {
            let symbol = match outcome {
                ProgressOutcome::Success => style(symbol).green().bold(),
                ProgressOutcome::Failure => style(symbol).red().bold(),
            };
            format!("{symbol} {text}")
        }
    }
}

impl ProgressReporter for SpinnerProgress {
    fn start(&self, message: &str) {
        if self.quiet {
            return;
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(spinner) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(spinner);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK);

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn stop(&self, outcome: ProgressOutcome, message: &str) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
        if self.quiet && outcome == ProgressOutcome::Success {
            return;
        }
        let _ = Term::stderr().write_line(&self.final_line(outcome, message));
    }
}
