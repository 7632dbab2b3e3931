//! Session state collected before anything is generated.

use std::fmt;

use crate::issues::IssueKey;
use crate::settings::RepositorySettings;

/// Everything the user has chosen so far. Any field may be pre-seeded from
/// the command line, in which case the matching prompt is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub project_key: Option<String>,
    pub issue_type: Option<String>,
    pub repository: Option<String>,
    pub story: Option<String>,
}

/// An input the "generate and create" action cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredInput {
    Project,
    IssueType,
    Repository,
    Story,
}

impl fmt::Display for RequiredInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequiredInput::Project => "project",
            RequiredInput::IssueType => "issue type",
            RequiredInput::Repository => "repository",
            RequiredInput::Story => "user story",
        };
        f.write_str(label)
    }
}

/// A command-line preset that does not match what the services offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetRejection {
    /// Not usable as a single directory name in the scratch workspace.
    RepositoryName(String),
    UnknownProject(String),
    /// Absent from the project's standard issue types (subtask types included).
    UnsupportedIssueType { project: String, issue_type: String },
    UnknownRepository(String),
}

impl fmt::Display for PresetRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetRejection::RepositoryName(name) => {
                write!(f, "Invalid repository name: {}", name)
            }
            PresetRejection::UnknownProject(key) => {
                write!(f, "Project {} is not among the available JIRA projects", key)
            }
            PresetRejection::UnsupportedIssueType {
                project,
                issue_type,
            } => write!(
                f,
                "Issue type {} is not a standard issue type of project {}",
                issue_type, project
            ),
            PresetRejection::UnknownRepository(name) => {
                write!(f, "Repository {} is not among the available GitHub repositories", name)
            }
        }
    }
}

/// A fully specified request, produced by [`SessionState::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    pub project_key: String,
    pub issue_type: String,
    pub repository: String,
    pub story: String,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl SessionState {
    /// Check that every required input is present.
    ///
    /// On failure returns all missing inputs, in prompt order. The story is
    /// trimmed; whitespace-only values count as missing.
    pub fn validate(&self) -> Result<StoryRequest, Vec<RequiredInput>> {
        let project_key = present(&self.project_key);
        let issue_type = present(&self.issue_type);
        let repository = present(&self.repository);
        let story = present(&self.story);

        match (project_key, issue_type, repository, story) {
            (Some(project_key), Some(issue_type), Some(repository), Some(story)) => {
                Ok(StoryRequest {
                    project_key,
                    issue_type,
                    repository,
                    story,
                })
            }
            (project_key, issue_type, repository, story) => Err([
                (RequiredInput::Project, project_key.is_none()),
                (RequiredInput::IssueType, issue_type.is_none()),
                (RequiredInput::Repository, repository.is_none()),
                (RequiredInput::Story, story.is_none()),
            ]
            .into_iter()
            .filter_map(|(input, missing)| missing.then_some(input))
            .collect()),
        }
    }
}

/// Branch, file names and commit message derived from the main issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPlan {
    pub branch: String,
    pub implementation_file: String,
    pub tests_file: String,
    pub commit_message: String,
}

impl DeliveryPlan {
    pub fn new(key: &IssueKey, story: &str, settings: &RepositorySettings) -> Self {
        let file_name = |suffix: &str| {
            if settings.file_extension.is_empty() {
                format!("{}_{}", key, suffix)
            } else {
                format!(
                    "{}_{}.{}",
                    key,
                    suffix,
                    settings.file_extension.trim_start_matches('.')
                )
            }
        };
        Self {
            branch: format!("{}{}", settings.branch_prefix, key),
            implementation_file: file_name("implementation"),
            tests_file: file_name("tests"),
            commit_message: format!("Implement {}: {}", key, story),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> SessionState {
        SessionState {
            project_key: Some("PROJ".into()),
            issue_type: Some("Story".into()),
            repository: Some("app".into()),
            story: Some("  Add login \n".into()),
        }
    }

    #[test]
    fn test_complete_session_validates_and_trims_story() {
        let request = complete().validate().unwrap();
        assert_eq!(request.story, "Add login");
        assert_eq!(request.repository, "app");
    }

    #[test]
    fn test_missing_story_and_repository_are_both_reported() {
        let session = SessionState {
            repository: None,
            story: Some("   ".into()),
            ..complete()
        };
        assert_eq!(
            session.validate().unwrap_err(),
            vec![RequiredInput::Repository, RequiredInput::Story]
        );
    }

    #[test]
    fn test_empty_session_reports_everything() {
        assert_eq!(SessionState::default().validate().unwrap_err().len(), 4);
    }

    #[test]
    fn test_required_input_labels() {
        assert_eq!(RequiredInput::Story.to_string(), "user story");
        assert_eq!(RequiredInput::IssueType.to_string(), "issue type");
    }

    #[test]
    fn test_preset_rejection_messages_name_the_value() {
        let rejection = PresetRejection::UnsupportedIssueType {
            project: "PROJ".into(),
            issue_type: "Subtask".into(),
        };
        assert_eq!(
            rejection.to_string(),
            "Issue type Subtask is not a standard issue type of project PROJ"
        );
        assert_eq!(
            PresetRejection::RepositoryName("../x".into()).to_string(),
            "Invalid repository name: ../x"
        );
    }

    #[test]
    fn test_plan_for_add_login() {
        let key = IssueKey::parse("PROJ-42").unwrap();
        let plan = DeliveryPlan::new(&key, "Add login", &RepositorySettings::default());
        assert_eq!(plan.branch, "feature/PROJ-42");
        assert_eq!(plan.implementation_file, "PROJ-42_implementation");
        assert_eq!(plan.tests_file, "PROJ-42_tests");
        assert_eq!(plan.commit_message, "Implement PROJ-42: Add login");
    }

    #[test]
    fn test_plan_appends_configured_extension() {
        let key = IssueKey::parse("PROJ-7").unwrap();
        let settings = RepositorySettings {
            file_extension: ".py".into(),
            ..RepositorySettings::default()
        };
        let plan = DeliveryPlan::new(&key, "x", &settings);
        assert_eq!(plan.implementation_file, "PROJ-7_implementation.py");
        assert_eq!(plan.tests_file, "PROJ-7_tests.py");
    }
}
