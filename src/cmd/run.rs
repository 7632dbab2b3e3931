//! The interactive story workflow: `storyforge run`.

use anyhow::Result;
use std::process::ExitCode;
use std::sync::Arc;

use storyforge::config::Credentials;
use storyforge::errors::RunError;
use storyforge::generate::AzureOpenAiClient;
use storyforge::issues::JiraClient;
use storyforge::orchestrator::{Orchestrator, RunOutcome, SessionState};
use storyforge::settings::Settings;
use storyforge::ui::ConsoleUi;
use storyforge::ui::icons::SPARKLE;
use storyforge::vcs::{GitCli, GitHubClient};

use super::super::RunArgs;

pub async fn cmd_run(settings: Settings, credentials: &Credentials, args: RunArgs) -> Result<ExitCode> {
    let tracker = JiraClient::new(&credentials.tracker, &settings.tracker.cloud_suffix);
    let host = GitHubClient::new(&credentials.repository, &settings.repository);
    let generator = AzureOpenAiClient::new(&credentials.generator, &settings.generation);

    let orchestrator = Orchestrator::new(
        Arc::new(tracker),
        Arc::new(host),
        Arc::new(GitCli::new()),
        Arc::new(generator),
        settings,
    );

    let presets = SessionState {
        project_key: args.project,
        issue_type: args.issue_type,
        repository: args.repo,
        story: args.story,
    };

    let mut ui = ConsoleUi::new();
    match orchestrator.run(&mut ui, presets, args.yes).await {
        Ok(RunOutcome::Completed(report)) => {
            println!();
            println!("{}Done: {}", SPARKLE, report.main_issue.link);
            for file in &report.files {
                println!("  {}/{}", report.branch, file);
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::Cancelled) => Ok(ExitCode::SUCCESS),
        Ok(outcome) => {
            tracing::debug!(?outcome, "run ended early");
            Ok(ExitCode::FAILURE)
        }
        // Prompt failures never reached the terminal; everything else already did.
        Err(e @ RunError::Prompt(_)) => Err(e.into()),
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            Ok(ExitCode::FAILURE)
        }
    }
}
