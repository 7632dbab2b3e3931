//! Prompt templates, one per generated artifact.

pub const ISSUE_DESCRIPTION_TEMPLATE: &str =
    "Generate a detailed JIRA issue description for the following user story:\n\n{story}";

pub const SUBTASK_DESCRIPTION_TEMPLATE: &str =
    "Generate a development subtask description for the following user story:\n\n{story}";

pub const SOURCE_CODE_TEMPLATE: &str =
    "Generate sample {language} code for the following user story:\n\n{story}";

pub const TEST_CASES_TEMPLATE: &str =
    "Generate test cases for the following user story:\n\n{story}";

/// The four artifacts produced for a story, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    IssueDescription,
    SubtaskDescription,
    SourceCode,
    TestCases,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::IssueDescription,
        ArtifactKind::SubtaskDescription,
        ArtifactKind::SourceCode,
        ArtifactKind::TestCases,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::IssueDescription => "issue description",
            ArtifactKind::SubtaskDescription => "subtask description",
            ArtifactKind::SourceCode => "sample code",
            ArtifactKind::TestCases => "test cases",
        }
    }

    fn template(self) -> &'static str {
        match self {
            ArtifactKind::IssueDescription => ISSUE_DESCRIPTION_TEMPLATE,
            ArtifactKind::SubtaskDescription => SUBTASK_DESCRIPTION_TEMPLATE,
            ArtifactKind::SourceCode => SOURCE_CODE_TEMPLATE,
            ArtifactKind::TestCases => TEST_CASES_TEMPLATE,
        }
    }

    /// Build the prompt for this artifact.
    ///
    /// The story is substituted last so braces inside it are never expanded.
    pub fn prompt(self, story: &str, language: &str) -> String {
        self.template()
            .replace("{language}", language)
            .replace("{story}", story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_story() {
        for kind in ArtifactKind::ALL {
            let prompt = kind.prompt("Add login", "Python");
            assert!(prompt.ends_with("user story:\n\nAdd login"), "{prompt}");
        }
    }

    #[test]
    fn test_code_prompt_names_language() {
        assert_eq!(
            ArtifactKind::SourceCode.prompt("Add login", "Rust"),
            "Generate sample Rust code for the following user story:\n\nAdd login"
        );
    }

    #[test]
    fn test_story_placeholders_are_not_expanded() {
        let prompt = ArtifactKind::SourceCode.prompt("Show {language} picker", "Go");
        assert!(prompt.ends_with("Show {language} picker"));
    }

    #[test]
    fn test_prompts_are_distinct() {
        let prompts: Vec<_> = ArtifactKind::ALL
            .iter()
            .map(|k| k.prompt("s", "Python"))
            .collect();
        for (i, a) in prompts.iter().enumerate() {
            for b in &prompts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
