pub mod config;
pub mod errors;
pub mod generate;
pub mod issues;
pub mod orchestrator;
pub mod settings;
pub mod ui;
pub mod vcs;
