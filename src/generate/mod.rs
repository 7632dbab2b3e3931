//! Text generation for a user story.
//!
//! A story yields four artifacts, each from its own prompt. Calls run one
//! after another; the first failure aborts the whole set.

pub mod azure;
pub mod prompts;

use async_trait::async_trait;

use crate::errors::GenerateError;

pub use azure::AzureOpenAiClient;
pub use prompts::ArtifactKind;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate text for `prompt`, trimmed of surrounding whitespace.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub issue_description: String,
    pub subtask_description: String,
    pub source_code: String,
    pub test_cases: String,
}

impl GeneratedArtifacts {
    fn slot(&mut self, kind: ArtifactKind) -> &mut String {
        match kind {
            ArtifactKind::IssueDescription => &mut self.issue_description,
            ArtifactKind::SubtaskDescription => &mut self.subtask_description,
            ArtifactKind::SourceCode => &mut self.source_code,
            ArtifactKind::TestCases => &mut self.test_cases,
        }
    }
}

/// Generate all four artifacts for `story`.
///
/// `on_step` is called before each request with the artifact about to be
/// generated.
pub async fn generate_artifacts(
    generator: &dyn ContentGenerator,
    story: &str,
    code_language: &str,
    mut on_step: impl FnMut(ArtifactKind),
) -> Result<GeneratedArtifacts, GenerateError> {
    let mut artifacts = GeneratedArtifacts::default();
    for kind in ArtifactKind::ALL {
        on_step(kind);
        let text = generator.generate(&kind.prompt(story, code_language)).await?;
        tracing::debug!(artifact = kind.label(), len = text.len(), "generated");
        *artifacts.slot(kind) = text;
    }
    Ok(artifacts)
}
