use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel answer marking a question as vacuously compliant.
///
/// Queries referencing a question answered this way are skipped and pass by
/// default; facts governed by such a question are omitted from the compiled
/// program (open-world treatment, consistent with negation-as-failure).
pub const NOT_APPLICABLE: &str = "Does not apply";

/// Declared answer type of a questionnaire question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionKind {
    Boolean,
    Numeric,
    Select,
    Text,
    Checkbox,
}

/// A single questionnaire question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

/// A fact clause template governed by one question.
///
/// The template may reference any question's answer through positional
/// `{i}` placeholders (1-indexed into `Form::questions`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactTemplate {
    pub question_id: String,
    pub template: String,
}

/// A validation rule, appended to the compiled program verbatim after the
/// same substitution pass as facts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTemplate {
    pub rule: String,
}

/// A compliance query with its human-readable description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryTemplate {
    pub query: String,
    pub description: String,
}

/// A complete form definition: questions plus the logic-program templates
/// derived from the regulation text.
///
/// Immutable for the duration of one validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub facts: Vec<FactTemplate>,
    #[serde(default)]
    pub validations: Vec<RuleTemplate>,
    #[serde(default)]
    pub queries: Vec<QueryTemplate>,
}

/// Raw answers keyed by question id. Absent keys mean unanswered.
pub type Responses = HashMap<String, String>;

impl Form {
    /// Look up a question by zero-based position
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

/// True when an answer is present and equals the not-applicable sentinel
pub fn is_not_applicable(answer: Option<&String>) -> bool {
    answer.map(|a| a == NOT_APPLICABLE).unwrap_or(false)
}
