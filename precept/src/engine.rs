use crate::compiler::{self, Compiled, PlanEntry};
use crate::form::{Form, Responses};
use crate::resource_limits::ResourceLimits;
use crate::response::{QueryOutcome, ValidationResult};
use crate::session::{ResolveOutcome, Session};
use crate::PreceptResult;

/// The precept validation engine.
///
/// Stateless apart from its resource limits: every validation request gets
/// a fresh interpreter session that is discarded afterwards, so independent
/// requests can run concurrently with no shared mutable state.
pub struct Engine {
    limits: ResourceLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            limits: ResourceLimits::default(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self { limits }
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Compile a form against its responses without executing anything.
    ///
    /// Exposed for tooling: questionnaire authors inspect the program text
    /// and the query plan this produces.
    pub fn compile(&self, form: &Form, responses: &Responses) -> Compiled {
        compiler::compile(form, responses)
    }

    /// Validate a response map against a form definition.
    ///
    /// Returns one row per query, in query order. A consult failure is
    /// fatal for the whole request; a failure while resolving one goal is
    /// isolated to that goal's row.
    pub fn validate(&self, form: &Form, responses: &Responses) -> PreceptResult<ValidationResult> {
        // Phase 1: shape the result before anything can fail
        let mut result = ValidationResult::sized(&form.queries);

        // Phase 2: compile, and apply skip decisions immediately
        let compiled = compiler::compile(form, responses);
        let mut executes = Vec::new();
        for entry in &compiled.plan.entries {
            match entry {
                PlanEntry::Skip { index } => {
                    result.passed[*index] = true;
                    result.outcomes[*index] = QueryOutcome::Skipped;
                }
                PlanEntry::Execute { index, goal } => executes.push((*index, goal.as_str())),
            }
        }

        // Phase 3: everything skipped, the interpreter is never touched
        if executes.is_empty() {
            return Ok(result);
        }

        // Phase 4: one consult for the whole batch; failure is fatal
        let mut session = Session::new(self.limits.clone());
        session.consult(&compiled.program)?;

        // Phase 5: resolve strictly in original order, isolating per-goal
        // failures
        for (index, goal) in executes {
            let (answers, outcome) = session.resolve(goal);
            let passed = answers
                .first()
                .map(|first| first == "true." || first == "true")
                .unwrap_or(false);
            result.passed[index] = passed;
            result.outcomes[index] = match outcome {
                ResolveOutcome::Errored => QueryOutcome::Errored,
                ResolveOutcome::LimitExceeded => QueryOutcome::LimitExceeded,
                ResolveOutcome::Completed => {
                    if passed {
                        QueryOutcome::Proved
                    } else {
                        QueryOutcome::Unproven
                    }
                }
            };
        }

        Ok(result)
    }
}
