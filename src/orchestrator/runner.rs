use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{GitError, RunError};
use crate::generate::{ContentGenerator, GeneratedArtifacts, generate_artifacts};
use crate::issues::{CreatedIssue, IssueTracker, NewIssue, standard_issue_types};
use crate::settings::Settings;
use crate::ui::Interaction;
use crate::vcs::{self, RepositoryHost, ScratchWorkspace, VersionControl};

use super::session::{DeliveryPlan, PresetRejection, RequiredInput, SessionState, StoryRequest};

/// How a run ended when it did not fail outright.
#[derive(Debug)]
pub enum RunOutcome {
    /// The tracker rejected the connection; nothing else was attempted.
    NotConnected,
    NoProjects,
    /// The user declined the generate action.
    Cancelled,
    MissingInput(Vec<RequiredInput>),
    /// A command-line preset was rejected before anything was created.
    InvalidPreset(PresetRejection),
    /// Content was generated but the main issue could not be created.
    IssueFailed,
    Completed(RunReport),
}

/// What a completed run created.
#[derive(Debug)]
pub struct RunReport {
    pub main_issue: CreatedIssue,
    pub subtask: Option<CreatedIssue>,
    pub repository: String,
    pub branch: String,
    pub files: Vec<String>,
}

/// Drives a single story from selection to pushed branch.
pub struct Orchestrator {
    tracker: Arc<dyn IssueTracker>,
    host: Arc<dyn RepositoryHost>,
    git: Arc<dyn VersionControl>,
    generator: Arc<dyn ContentGenerator>,
    settings: Settings,
}

impl Orchestrator {
    pub fn new(
        tracker: Arc<dyn IssueTracker>,
        host: Arc<dyn RepositoryHost>,
        git: Arc<dyn VersionControl>,
        generator: Arc<dyn ContentGenerator>,
        settings: Settings,
    ) -> Self {
        Self {
            tracker,
            host,
            git,
            generator,
            settings,
        }
    }

    /// Run the interactive workflow.
    ///
    /// Fields already set in `presets` are not prompted for, but each is
    /// checked against what the tracker and host list before anything is
    /// created. A preset repository name must be a single path component. With
    /// `auto_confirm` the generate action starts without asking. The scratch
    /// workspace is removed before this returns, whatever the outcome.
    pub async fn run(
        &self,
        ui: &mut dyn Interaction,
        presets: SessionState,
        auto_confirm: bool,
    ) -> Result<RunOutcome, RunError> {
        let mut workspace = ScratchWorkspace::new();
        let result = self
            .run_in(&mut workspace, ui, presets, auto_confirm)
            .await;
        workspace.cleanup();
        result
    }

    async fn run_in(
        &self,
        workspace: &mut ScratchWorkspace,
        ui: &mut dyn Interaction,
        mut session: SessionState,
        auto_confirm: bool,
    ) -> Result<RunOutcome, RunError> {
        if let Some(repo) = &session.repository
            && !vcs::is_valid_repo_name(repo.trim())
        {
            return Ok(reject(ui, PresetRejection::RepositoryName(repo.clone())));
        }

        match self.tracker.authenticate().await {
            Ok(name) => ui.success(&format!("Successfully connected to Jira Cloud as {}", name)),
            Err(e) => {
                tracing::warn!(error = %e, "tracker connection failed");
                for line in e.guidance() {
                    ui.error(&line);
                }
                ui.error("Failed to connect to JIRA. Please check your credentials and instance URL.");
                return Ok(RunOutcome::NotConnected);
            }
        }

        let projects = match self.tracker.list_projects().await {
            Ok(projects) => projects,
            Err(e) => {
                ui.error(&format!("Error getting projects: {}", e));
                Vec::new()
            }
        };
        if projects.is_empty() {
            ui.error("No projects found in JIRA");
            return Ok(RunOutcome::NoProjects);
        }

        match preset(&session.project_key) {
            Some(key) if !projects.iter().any(|p| p.key == key) => {
                return Ok(reject(ui, PresetRejection::UnknownProject(key)));
            }
            Some(_) => {}
            None => {
                let labels: Vec<String> = projects.iter().map(|p| p.label()).collect();
                let choice = ui
                    .select("Select JIRA Project", &labels)
                    .map_err(RunError::Prompt)?;
                session.project_key = pick(&projects, choice).map(|p| p.key);
            }
        }

        if let Some(project_key) = preset(&session.project_key) {
            let types = match self.tracker.list_issue_types(&project_key).await {
                Ok(types) => types,
                Err(e) => {
                    ui.error(&format!("Error getting issue types: {}", e));
                    return Err(e.into());
                }
            };
            let names = standard_issue_types(&types);
            match preset(&session.issue_type) {
                Some(issue_type) if !names.contains(&issue_type) => {
                    let rejection = PresetRejection::UnsupportedIssueType {
                        project: project_key,
                        issue_type,
                    };
                    return Ok(reject(ui, rejection));
                }
                Some(_) => {}
                None => {
                    if names.is_empty() {
                        ui.warning(&format!("Project {} has no standard issue types", project_key));
                    }
                    let choice = ui
                        .select("Select Issue Type", &names)
                        .map_err(RunError::Prompt)?;
                    session.issue_type = pick(&names, choice);
                }
            }
        }

        let repos = match self.host.list_repositories().await {
            Ok(repos) => repos,
            Err(e) => {
                ui.error(&e.to_string());
                Vec::new()
            }
        };
        match preset(&session.repository) {
            Some(repo) if !repos.contains(&repo) => {
                return Ok(reject(ui, PresetRejection::UnknownRepository(repo)));
            }
            Some(_) => {}
            None => {
                if repos.is_empty() {
                    ui.warning("No GitHub repositories available");
                }
                let choice = ui
                    .select("Select GitHub Repository", &repos)
                    .map_err(RunError::Prompt)?;
                session.repository = pick(&repos, choice);
            }
        }

        if session.story.is_none() {
            session.story = Some(ui.input("Enter User Story").map_err(RunError::Prompt)?);
        }

        if !auto_confirm
            && !ui
                .confirm("Generate Content and Create Issues?")
                .map_err(RunError::Prompt)?
        {
            ui.info("Nothing was generated.");
            return Ok(RunOutcome::Cancelled);
        }

        let request = match session.validate() {
            Ok(request) => request,
            Err(missing) => {
                let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
                ui.warning(&format!(
                    "Cannot generate content, missing: {}",
                    names.join(", ")
                ));
                return Ok(RunOutcome::MissingInput(missing));
            }
        };

        self.execute(&request, workspace, ui).await
    }

    /// Generate, create both issues and push the files for a validated request.
    async fn execute(
        &self,
        request: &StoryRequest,
        workspace: &mut ScratchWorkspace,
        ui: &mut dyn Interaction,
    ) -> Result<RunOutcome, RunError> {
        tracing::info!(
            project = %request.project_key,
            repo = %request.repository,
            "starting generation"
        );

        let generated = generate_artifacts(
            self.generator.as_ref(),
            &request.story,
            &self.settings.generation.code_language,
            |kind| ui.start_progress(&format!("Generating {}...", kind.label())),
        )
        .await;
        ui.finish_progress();
        let artifacts = match generated {
            Ok(artifacts) => artifacts,
            Err(e) => {
                ui.error(&format!("Content generation failed: {}", e));
                return Err(e.into());
            }
        };

        let main = NewIssue {
            project_key: request.project_key.clone(),
            summary: request.story.clone(),
            description: artifacts.issue_description.clone(),
            issue_type: request.issue_type.clone(),
            parent: None,
        };
        let main_issue = match self.tracker.create_issue(&main).await {
            Ok(issue) => issue,
            Err(e) => {
                tracing::error!(error = %e, "Error creating JIRA issue");
                ui.error("Failed to create main issue");
                return Ok(RunOutcome::IssueFailed);
            }
        };
        ui.success(&format!(
            "Main issue created: {} ({})",
            main_issue.key, main_issue.link
        ));

        let tracker_settings = &self.settings.tracker;
        let subtask = NewIssue {
            project_key: request.project_key.clone(),
            summary: format!("{}{}", tracker_settings.subtask_summary_prefix, request.story),
            description: artifacts.subtask_description.clone(),
            issue_type: tracker_settings.subtask_type.clone(),
            parent: Some(main_issue.key.clone()),
        };
        let subtask_issue = match self.tracker.create_issue(&subtask).await {
            Ok(issue) => {
                ui.success(&format!(
                    "Development subtask created: {} ({})",
                    issue.key, issue.link
                ));
                Some(issue)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error creating JIRA subtask");
                ui.error("Failed to create development subtask");
                None
            }
        };

        let plan = DeliveryPlan::new(&main_issue.key, &request.story, &self.settings.repository);
        ui.start_progress(&format!("Pushing to {}...", request.repository));
        let pushed = self
            .deliver(workspace, &request.repository, &plan, &artifacts)
            .await;
        ui.finish_progress();
        if let Err(e) = pushed {
            ui.error(&e.to_string());
            return Err(e.into());
        }
        ui.success(&format!(
            "Changes committed and pushed to {} on branch {}",
            request.repository, plan.branch
        ));

        Ok(RunOutcome::Completed(RunReport {
            main_issue,
            subtask: subtask_issue,
            repository: request.repository.clone(),
            branch: plan.branch,
            files: vec![plan.implementation_file, plan.tests_file],
        }))
    }

    async fn deliver(
        &self,
        workspace: &mut ScratchWorkspace,
        repo: &str,
        plan: &DeliveryPlan,
        artifacts: &GeneratedArtifacts,
    ) -> Result<PathBuf, GitError> {
        let repo_path =
            vcs::checkout(workspace, self.host.as_ref(), self.git.as_ref(), repo).await?;
        self.git.create_branch(&repo_path, &plan.branch).await?;

        write_file(&repo_path.join(&plan.implementation_file), &artifacts.source_code).await?;
        write_file(&repo_path.join(&plan.tests_file), &artifacts.test_cases).await?;

        self.git
            .commit_and_push(&repo_path, &plan.branch, &plan.commit_message)
            .await?;
        Ok(repo_path)
    }
}

/// A set field, trimmed, as an owned value.
fn preset(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_string())
}

/// Item at the selected index; an index outside `items` counts as no selection.
fn pick<T: Clone>(items: &[T], choice: Option<usize>) -> Option<T> {
    choice.and_then(|i| items.get(i).cloned())
}

fn reject(ui: &mut dyn Interaction, rejection: PresetRejection) -> RunOutcome {
    tracing::warn!(%rejection, "preset rejected");
    ui.error(&rejection.to_string());
    RunOutcome::InvalidPreset(rejection)
}

async fn write_file(path: &Path, contents: &str) -> Result<(), GitError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| GitError::Io {
            path: path.to_path_buf(),
            source,
        })
}
