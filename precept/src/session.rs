//! One interpreter session: consult a program, bind goals, pull answers.
//!
//! A session is created fresh for each validation request and discarded
//! afterwards. Goals run strictly sequentially; the solver state of the
//! in-flight goal lives in the session and is replaced by the next `query`.

use crate::ast::Term;
use crate::error::PreceptError;
use crate::machine::{resolve, Database, Solver, Step, StepBudget, Subst};
use crate::parser;
use crate::resource_limits::ResourceLimits;
use crate::PreceptResult;
use regex::Regex;
use std::sync::OnceLock;

/// Result of pulling one answer for the bound goal
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// A solution with at least one variable binding to report
    Solved(String),
    /// No (more) solutions exist
    Failed,
    /// The inference-step budget ran out before a decision was reached
    LimitReached,
}

/// How a full resolution loop for one goal ended. Kept distinct from the
/// answer list for diagnostics: a limit hit and a plain failure both fail
/// the goal, but they are not the same event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Completed,
    LimitExceeded,
    Errored,
}

struct ActiveQuery {
    solver: Solver,
    vars: Vec<String>,
    budget: StepBudget,
    rename: usize,
}

/// A logic interpreter session: one clause database plus at most one
/// in-flight goal
pub struct Session {
    limits: ResourceLimits,
    db: Database,
    active: Option<ActiveQuery>,
}

impl Session {
    pub fn new(limits: ResourceLimits) -> Self {
        Self {
            limits,
            db: Database::new(),
            active: None,
        }
    }

    /// Load a program into the session.
    ///
    /// Fails fatally on any syntax or module-loading error: a malformed
    /// program cannot safely run any query.
    pub fn consult(&mut self, source: &str) -> PreceptResult<()> {
        let program = parser::parse_program(source, &self.limits)?;
        self.db.load(&program, &self.limits)
    }

    /// Bind a goal for subsequent resolution. Produces no answers itself.
    pub fn query(&mut self, goal_text: &str) -> PreceptResult<()> {
        let goals = parser::parse_query(goal_text, &self.limits)?;
        let mut vars = Vec::new();
        for goal in &goals {
            goal.collect_vars(&mut vars);
        }
        vars.retain(|name| !name.starts_with('_'));
        self.active = Some(ActiveQuery {
            solver: Solver::for_goals(&goals),
            vars,
            budget: StepBudget::new(self.limits.max_inference_steps),
            rename: 0,
        });
        Ok(())
    }

    /// Pull the next answer for the bound goal.
    ///
    /// Solutions with no variable bindings to report are not surfaced;
    /// a goal with only such solutions terminates via `Failed`.
    pub fn answer(&mut self) -> PreceptResult<Answer> {
        let active = self
            .active
            .as_mut()
            .ok_or_else(|| PreceptError::Query("no goal is bound".to_string()))?;
        loop {
            match active
                .solver
                .next(&self.db, &mut active.budget, &mut active.rename)
            {
                Ok(Step::Solution(subst)) => {
                    let text = format_bindings(&active.vars, &subst);
                    if text.is_empty() {
                        continue;
                    }
                    return Ok(Answer::Solved(text));
                }
                Ok(Step::Exhausted) => return Ok(Answer::Failed),
                Ok(Step::OutOfFuel) => return Ok(Answer::LimitReached),
                Err(e) => return Err(PreceptError::Query(e.to_string())),
            }
        }
    }

    /// Run the full resolution loop for one goal, enumerating every
    /// solution.
    ///
    /// When the loop terminates with nothing collected, a sentinel entry is
    /// appended: `"false."` on failure, `"reached limit."` on budget
    /// exhaustion. The exception is a goal failing immediately whose text
    /// reads as a ground fact call: it records the single implicit answer
    /// `"true."`, since a boolean goal that succeeds has no bindings to
    /// report and callers recognize it by this token.
    ///
    /// An error raised while resolving leaves the answer list empty and
    /// never poisons the session for subsequent goals.
    pub fn resolve(&mut self, goal_text: &str) -> (Vec<String>, ResolveOutcome) {
        if self.query(goal_text).is_err() {
            return (Vec::new(), ResolveOutcome::Errored);
        }
        let mut answers = Vec::new();
        loop {
            if answers.len() >= self.limits.max_solutions {
                return (answers, ResolveOutcome::Completed);
            }
            match self.answer() {
                Ok(Answer::Solved(text)) => answers.push(text),
                Ok(Answer::Failed) => {
                    if answers.is_empty() {
                        if looks_like_ground_call(goal_text) {
                            answers.push("true.".to_string());
                        } else {
                            answers.push("false.".to_string());
                        }
                    }
                    return (answers, ResolveOutcome::Completed);
                }
                Ok(Answer::LimitReached) => {
                    if answers.is_empty() {
                        answers.push("reached limit.".to_string());
                    }
                    return (answers, ResolveOutcome::LimitExceeded);
                }
                Err(_) => return (Vec::new(), ResolveOutcome::Errored),
            }
        }
    }
}

fn format_bindings(vars: &[String], subst: &Subst) -> String {
    let mut parts = Vec::new();
    for name in vars {
        let value = resolve(subst, &Term::Var(name.clone()));
        if matches!(value, Term::Var(_)) {
            continue;
        }
        parts.push(format!("{} = {}", name, value));
    }
    parts.join(", ")
}

/// Syntactic check for a goal shaped like a ground fact call: a lowercase
/// functor, optional argument list, no variable tokens outside quotes.
/// This is a textual heuristic, not semantic ground-term detection.
pub fn looks_like_ground_call(goal_text: &str) -> bool {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| {
        Regex::new(r"^[a-z][a-zA-Z0-9_]*(\(.*\))?$").unwrap()
    });
    let trimmed = goal_text.trim().trim_end_matches('.').trim();
    shape.is_match(trimmed) && !contains_variable_token(trimmed)
}

fn contains_variable_token(text: &str) -> bool {
    let mut in_quote = false;
    let mut escaped = false;
    let mut prev_is_word = false;
    for c in text.chars() {
        if in_quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '\'' {
                in_quote = false;
                prev_is_word = true;
            }
            continue;
        }
        if c == '\'' {
            in_quote = true;
            prev_is_word = false;
            continue;
        }
        if (c.is_ascii_uppercase() || c == '_') && !prev_is_word {
            return true;
        }
        prev_is_word = c.is_ascii_alphanumeric() || c == '_';
    }
    false
}
