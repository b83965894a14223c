//! Draft entities produced by the writer capability

use serde::{Deserialize, Serialize};

/// What the writer did to the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DraftAction {
    #[default]
    Create,
    Modify,
}

impl DraftAction {
    pub fn as_str(&self) -> &str {
        match self {
            DraftAction::Create => "create",
            DraftAction::Modify => "modify",
        }
    }

    /// Lenient parse of a model-supplied action label.
    ///
    /// Only `modify` (any case) maps to [`DraftAction::Modify`]; everything
    /// else is treated as a creation.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("modify") {
            DraftAction::Modify
        } else {
            DraftAction::Create
        }
    }
}

impl std::fmt::Display for DraftAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The writer's output for one iteration of a task.
///
/// Superseded by the next draft on every loop. An empty `content` is a
/// legitimate draft and goes through review like any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Complete file content
    pub content: String,
    /// Writer iteration that produced this draft (1-based once stamped)
    pub iteration: u32,
    /// File the draft is for
    pub path: String,
    pub action: DraftAction,
    /// Writer's short note on what changed
    pub explanation: Option<String>,
}

impl Draft {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            iteration: 0,
            path: path.into(),
            action: DraftAction::Create,
            explanation: None,
        }
    }

    pub fn with_action(mut self, action: DraftAction) -> Self {
        self.action = action;
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_iteration(mut self, iteration: u32) -> Self {
        self.iteration = iteration;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Single-line note used in progress output and logs.
    pub fn note(&self) -> String {
        format!("Wrote {} ({})", self.path, self.action)
    }
}
