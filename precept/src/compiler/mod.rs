//! Compiles a form definition plus a response map into logic-program
//! source and an ordered query plan.
//!
//! 1. Resolve fact templates whose governing question has a usable answer
//! 2. Append every validation rule after the same substitution pass
//! 3. Decide skip-or-execute for every query, preserving original indices

pub mod template;

use crate::form::{is_not_applicable, Form, Responses};

/// Library imports prepended to every compiled program
pub const PROGRAM_PREAMBLE: &str = ":- use_module(library(lists)).";

/// One query's fate: short-circuited by skip-logic, or resolved against
/// the engine with its substituted goal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEntry {
    Skip { index: usize },
    Execute { index: usize, goal: String },
}

impl PlanEntry {
    pub fn index(&self) -> usize {
        match self {
            PlanEntry::Skip { index } => *index,
            PlanEntry::Execute { index, .. } => *index,
        }
    }
}

/// Ordered plan covering every query exactly once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    pub entries: Vec<PlanEntry>,
}

/// Output of one compilation: ephemeral, scoped to a single request
#[derive(Debug, Clone)]
pub struct Compiled {
    pub program: String,
    pub plan: QueryPlan,
}

/// Compile a form against its responses.
///
/// Total: unresolved placeholders degrade to verbatim tokens rather than
/// raising here; if that leaves the program malformed, consultation
/// reports it. Deterministic: identical input yields byte-identical
/// program text and plan.
pub fn compile(form: &Form, responses: &Responses) -> Compiled {
    let mut program = String::from(PROGRAM_PREAMBLE);
    program.push('\n');

    for fact in &form.facts {
        let answer = responses.get(&fact.question_id);
        if answer.is_none() || is_not_applicable(answer) {
            continue;
        }
        let resolved = template::substitute(
            &template::normalize_escapes(&fact.template),
            form,
            responses,
        );
        let resolved = resolved.trim();
        if resolved.is_empty() {
            continue;
        }
        program.push_str(resolved);
        if !resolved.ends_with('.') {
            program.push('.');
        }
        program.push('\n');
    }

    for validation in &form.validations {
        let resolved = template::substitute(
            &template::normalize_escapes(&validation.rule),
            form,
            responses,
        );
        let resolved = resolved.trim();
        if resolved.is_empty() {
            continue;
        }
        program.push_str(resolved);
        program.push('\n');
    }

    let mut entries = Vec::with_capacity(form.queries.len());
    for (index, query) in form.queries.iter().enumerate() {
        let skipped = template::referenced_questions(&query.query)
            .into_iter()
            .any(|i| {
                form.question_at(i)
                    .map(|question| is_not_applicable(responses.get(&question.id)))
                    .unwrap_or(false)
            });
        if skipped {
            entries.push(PlanEntry::Skip { index });
            continue;
        }
        let goal = template::substitute(
            &template::normalize_escapes(&query.query),
            form,
            responses,
        );
        let goal = goal.trim();
        let goal = goal.strip_prefix("?-").map(str::trim).unwrap_or(goal);
        entries.push(PlanEntry::Execute {
            index,
            goal: goal.to_string(),
        });
    }

    Compiled {
        program,
        plan: QueryPlan { entries },
    }
}
