use crate::form::QueryTemplate;
use serde::Serialize;

/// How one query's row came to its verdict. Not serialized: callers see
/// only `passed`/`description`, but a limit hit and a plain failure are
/// different events for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Short-circuited by skip-logic, passed by default
    Skipped,
    /// The engine produced the success token
    Proved,
    /// The engine completed without proving the goal
    Unproven,
    /// The inference-step budget ran out; inconclusive, counts as failing
    LimitExceeded,
    /// Resolution raised; isolated to this row
    Errored,
}

/// Outcome of one validation request.
///
/// Both arrays are pre-sized to the query count before any execution, so a
/// result is always fully shaped even under partial failure: one row per
/// original query, descriptions always present.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub passed: Vec<bool>,
    pub description: Vec<String>,
    #[serde(skip)]
    pub outcomes: Vec<QueryOutcome>,
}

impl ValidationResult {
    /// Shape a result for a query list: descriptions copied immediately,
    /// every row failing until resolution says otherwise
    pub fn sized(queries: &[QueryTemplate]) -> Self {
        Self {
            passed: vec![false; queries.len()],
            description: queries.iter().map(|q| q.description.clone()).collect(),
            outcomes: vec![QueryOutcome::Unproven; queries.len()],
        }
    }
}
