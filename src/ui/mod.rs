//! Interactive surface of a run.
//!
//! The orchestrator only sees [`Interaction`]; [`ConsoleUi`] renders it on a
//! terminal with `dialoguer` prompts and `indicatif` spinners.

pub mod icons;
pub mod terminal;

use std::io;

pub use terminal::ConsoleUi;

/// Severity of a status line shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

pub trait Interaction {
    /// Show a status line.
    fn notify(&mut self, level: Level, message: &str);

    /// Pick one of `items`; `None` when there is nothing to pick.
    ///
    /// Callers treat an index outside `items` as no selection.
    fn select(&mut self, prompt: &str, items: &[String]) -> io::Result<Option<usize>>;

    /// Free-text input; may return an empty string.
    fn input(&mut self, prompt: &str) -> io::Result<String>;

    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;

    /// Show a busy indicator until [`Interaction::finish_progress`].
    fn start_progress(&mut self, message: &str);

    fn finish_progress(&mut self);

    fn info(&mut self, message: &str) {
        self.notify(Level::Info, message);
    }

    fn success(&mut self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn warning(&mut self, message: &str) {
        self.notify(Level::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(Level::Error, message);
    }
}
