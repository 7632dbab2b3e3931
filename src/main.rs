use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use storyforge::config::{Credentials, load_env_file};
use storyforge::settings::Settings;

mod cmd;

#[derive(Parser)]
#[command(name = "storyforge")]
#[command(
    version,
    about = "Turn a user story into Jira issues and a pushed feature branch"
)]
pub struct Cli {
    /// Log request details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// dotenv file to load instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Settings file (defaults to ./storyforge.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive story workflow (the default)
    Run(RunArgs),
    /// List the Jira projects a run would offer
    Projects,
    /// List the GitHub repositories a run would offer
    Repos,
    /// Show effective settings and which credentials are set
    Config,
}

#[derive(Args, Default)]
pub struct RunArgs {
    /// Jira project key; skips the project prompt (must be a listed project)
    #[arg(long)]
    pub project: Option<String>,

    /// Issue type for the main issue; skips the issue type prompt (subtask types are refused)
    #[arg(long)]
    pub issue_type: Option<String>,

    /// Repository name; skips the repository prompt (must be a listed repository)
    #[arg(long)]
    pub repo: Option<String>,

    /// User story text; skips the story prompt
    #[arg(long)]
    pub story: Option<String>,

    /// Start generation without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    load_env_file(cli.env_file.as_deref())?;
    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let (settings, settings_path) = Settings::load_or_default(cli.config.as_deref(), &working_dir)?;

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            let credentials = Credentials::from_env()?;
            cmd::cmd_run(settings, &credentials, args).await
        }
        Commands::Projects => {
            let credentials = Credentials::from_env()?;
            cmd::cmd_projects(&settings, &credentials).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Repos => {
            let credentials = Credentials::from_env()?;
            cmd::cmd_repos(&settings, &credentials).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            cmd::cmd_config(&settings, settings_path.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
