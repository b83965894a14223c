//! Prompt templates for the writer, reviewer and collator roles

use crate::draft::entities::Draft;
use crate::review::entities::ViolationReport;
use crate::review::parsing::ModelReviewResult;
use crate::task::entities::TaskRequest;

/// Placeholder sent to the writer on its first pass
pub const NO_FEEDBACK: &str = "No review feedback provided.";

/// Templates for the writer role
pub struct WriterPromptTemplate;

impl WriterPromptTemplate {
    /// Render reviewer feedback for the writer.
    ///
    /// The full report is forwarded, warnings included, as pretty JSON.
    pub fn format_feedback(feedback: Option<&ViolationReport>) -> String {
        match feedback {
            Some(report) if !report.is_empty() => serde_json::to_string_pretty(report)
                .unwrap_or_else(|_| report.summary().to_string()),
            _ => NO_FEEDBACK.to_string(),
        }
    }

    /// User prompt asking for the complete content of one file
    pub fn write_file(
        request: &TaskRequest,
        rules_text: &str,
        feedback: Option<&ViolationReport>,
    ) -> String {
        let existing_section = match request.existing_content() {
            Some(content) if !content.is_empty() => format!(
                "Existing file content (modify as needed):\n{}\n\n",
                content
            ),
            _ => "This is a new file. Create it from scratch.\n\n".to_string(),
        };

        let context_section = if request.context_files().is_empty() {
            String::new()
        } else {
            let parts: Vec<String> = request
                .context_files()
                .iter()
                .map(|ctx| format!("Context file: {}\nContent:\n{}\n", ctx.path, ctx.content))
                .collect();
            format!("Reference context files:\n\n{}\n\n", parts.join("\n---\n"))
        };

        format!(
            r#"You are a strict code writer agent. Write or modify exactly one file following every rule below. Return the COMPLETE file content.

Writer rules:
{rules}

Task:
{task}

Target file path: {path}

{existing}{context}Review feedback from prior cycles:
{feedback}"#,
            rules = rules_text,
            task = request.instructions(),
            path = request.path(),
            existing = existing_section,
            context = context_section,
            feedback = Self::format_feedback(feedback),
        )
    }
}

/// Templates for the reviewer and collator roles
pub struct ReviewerPromptTemplate;

impl ReviewerPromptTemplate {
    /// User prompt asking one model to review one draft
    pub fn review_file(draft: &Draft, rules_text: &str) -> String {
        format!(
            r#"You are a strict code reviewer. Review exactly one file and detect all rule violations.

Rules file content:
{}

Target file path:
{}

Target file content:
{}"#,
            rules_text, draft.path, draft.content
        )
    }

    /// User prompt asking the collator to merge several reviewers' findings
    pub fn collate(results: &[ModelReviewResult], rules_text: &str) -> String {
        let mut prompt = format!(
            r#"You are a senior code review adjudicator. Consolidate and de-duplicate the issue lists from {} reviewer models while preserving coverage.

Rules file content:
{}
"#,
            results.len(),
            rules_text
        );

        for result in results {
            let rendered = serde_json::to_string_pretty(result)
                .unwrap_or_else(|_| format!("{} issue(s)", result.issues.len()));
            prompt.push_str(&format!("\nReviewer result ({}):\n{}\n", result.model, rendered));
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::entities::Violation;
    use crate::review::parsing::ReviewIssue;
    use crate::task::entities::ContextFile;

    #[test]
    fn test_format_feedback_none() {
        assert_eq!(WriterPromptTemplate::format_feedback(None), NO_FEEDBACK);
        let clean = ViolationReport::clean();
        assert_eq!(WriterPromptTemplate::format_feedback(Some(&clean)), NO_FEEDBACK);
    }

    #[test]
    fn test_format_feedback_forwards_full_report() {
        let report = ViolationReport::new(vec![
            Violation::error("R-1", "Missing docstring"),
            Violation::warning("R-2", "Long line"),
        ]);
        let text = WriterPromptTemplate::format_feedback(Some(&report));
        assert!(text.contains("Missing docstring"));
        assert!(text.contains("Long line"));
        assert!(text.contains("\"severity\": \"warning\""));
    }

    #[test]
    fn test_write_file_new_file() {
        let request = TaskRequest::new("src/a.py", "Create a helper").unwrap();
        let prompt = WriterPromptTemplate::write_file(&request, "RULES", None);
        assert!(prompt.contains("RULES"));
        assert!(prompt.contains("Create a helper"));
        assert!(prompt.contains("Target file path: src/a.py"));
        assert!(prompt.contains("This is a new file"));
        assert!(!prompt.contains("Reference context files"));
        assert!(prompt.ends_with(NO_FEEDBACK));
    }

    #[test]
    fn test_write_file_with_existing_and_context() {
        let request = TaskRequest::new("src/a.py", "Refactor")
            .unwrap()
            .with_existing_content("x = 1\n")
            .with_context_file(ContextFile::new("models.py", "class User: ..."));
        let prompt = WriterPromptTemplate::write_file(&request, "RULES", None);
        assert!(prompt.contains("Existing file content (modify as needed):\nx = 1"));
        assert!(prompt.contains("Context file: models.py"));
        assert!(!prompt.contains("This is a new file"));
    }

    #[test]
    fn test_review_file_prompt() {
        let draft = Draft::new("a.py", "print('x')");
        let prompt = ReviewerPromptTemplate::review_file(&draft, "RULES");
        assert!(prompt.contains("Target file path:\na.py"));
        assert!(prompt.ends_with("print('x')"));
    }

    #[test]
    fn test_collate_prompt_lists_every_model() {
        let results = vec![
            ModelReviewResult {
                model: "openai/gpt-5.2-codex".to_string(),
                issues: vec![ReviewIssue {
                    file_path: "a.py".to_string(),
                    issue: "No type hints".to_string(),
                    violation: "Rule 20".to_string(),
                    suggested_fix: "Annotate".to_string(),
                    severity: None,
                }],
            },
            ModelReviewResult {
                model: "google/gemini-3-flash-preview".to_string(),
                issues: vec![],
            },
        ];
        let prompt = ReviewerPromptTemplate::collate(&results, "RULES");
        assert!(prompt.contains("from 2 reviewer models"));
        assert!(prompt.contains("Reviewer result (openai/gpt-5.2-codex)"));
        assert!(prompt.contains("Reviewer result (google/gemini-3-flash-preview)"));
        assert!(prompt.contains("No type hints"));
    }
}
