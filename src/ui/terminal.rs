use std::io;
use std::time::Duration;

use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};

use super::icons::{CHECK, CROSS, INFO, WARN};
use super::{Interaction, Level};

/// Terminal implementation of [`Interaction`].
///
/// Prompts go through `dialoguer` with the colourful theme; status lines are
/// printed to stdout, routed through the active spinner when there is one so
/// they do not tear its line.
pub struct ConsoleUi {
    theme: ColorfulTheme,
    spinner: Option<ProgressBar>,
}

impl Default for ConsoleUi {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            spinner: None,
        }
    }

    fn print_line(&self, line: String) {
        match &self.spinner {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }
}

fn to_io(err: dialoguer::Error) -> io::Error {
    io::Error::other(err.to_string())
}

impl Interaction for ConsoleUi {
    fn notify(&mut self, level: Level, message: &str) {
        let line = match level {
            Level::Info => format!("{}{}", INFO, message),
            Level::Success => format!("{}{}", CHECK, style(message).green()),
            Level::Warning => format!("{}{}", WARN, style(message).yellow()),
            Level::Error => format!("{}{}", CROSS, style(message).red().bold()),
        };
        self.print_line(line);
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> io::Result<Option<usize>> {
        if items.is_empty() {
            return Ok(None);
        }
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(to_io)
    }

    fn input(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(to_io)
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(to_io)
    }

    fn start_progress(&mut self, message: &str) {
        let bar = match self.spinner.take() {
            Some(bar) => bar,
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner} {msg}")
                        .expect("spinner template is a valid static string"),
                );
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        bar.set_message(message.to_string());
        self.spinner = Some(bar);
    }

    fn finish_progress(&mut self) {
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
    }
}
