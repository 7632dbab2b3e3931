//! Configuration view: `storyforge config`.

use anyhow::{Context, Result};
use std::path::Path;

use storyforge::config::ALL_VARIABLES;
use storyforge::settings::{SETTINGS_FILE, Settings};
use storyforge::ui::icons::{CHECK, CROSS};

/// Print the effective settings and which credential variables are set.
///
/// Credential values are never printed.
pub fn cmd_config(settings: &Settings, settings_path: Option<&Path>) -> Result<()> {
    println!();
    println!("Storyforge Configuration");
    println!("========================");
    println!();

    match settings_path {
        Some(path) => println!("Settings file: {}", path.display()),
        None => println!("No {} found. Using default settings.", SETTINGS_FILE),
    }
    println!();

    let rendered = toml::to_string_pretty(settings).context("Failed to render settings")?;
    println!("{}", rendered.trim_end());
    println!();

    println!("Credentials:");
    for name in ALL_VARIABLES {
        let set = std::env::var(name).is_ok_and(|v| !v.trim().is_empty());
        let marker = if set { CHECK } else { CROSS };
        println!("  {}{} {}", marker, name, if set { "set" } else { "not set" });
    }
    println!();

    Ok(())
}
