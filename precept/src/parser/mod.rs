use crate::ast::{Clause, Goal, Program, Span};
use crate::error::PreceptError;
use crate::resource_limits::ResourceLimits;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod terms;

#[derive(Parser)]
#[grammar = "src/parser/precept.pest"]
pub struct PreceptParser;

/// Parse a complete logic program: directives first-class, then clauses.
///
/// Any syntax error is a consult error for the whole program; a partially
/// loaded program is never returned.
pub fn parse_program(source: &str, limits: &ResourceLimits) -> Result<Program, PreceptError> {
    if source.len() > limits.max_program_bytes {
        return Err(PreceptError::ResourceLimitExceeded {
            limit_name: "max_program_bytes".to_string(),
            limit_value: format!("{} bytes", limits.max_program_bytes),
            actual_value: format!("{} bytes", source.len()),
            suggestion: "Reduce the number of fact and rule templates".to_string(),
        });
    }

    let pairs = PreceptParser::parse(Rule::program, source)
        .map_err(|e| pest_to_consult(e, source))?;

    let mut program = Program::default();
    let mut wildcards = 0usize;
    for pair in pairs {
        if pair.as_rule() != Rule::program {
            continue;
        }
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::directive => {
                    let span = pair_span(&inner);
                    let goal_pair = inner
                        .into_inner()
                        .next()
                        .ok_or_else(|| PreceptError::Engine("malformed directive".to_string()))?;
                    match terms::build_goal(goal_pair, source)? {
                        Goal::Call(term) => program.directives.push(term),
                        Goal::True => {}
                        _ => {
                            return Err(PreceptError::consult(
                                "unsupported directive",
                                span,
                                Arc::from(source),
                            ));
                        }
                    }
                }
                Rule::clause => {
                    let span = pair_span(&inner);
                    let clause = terms::build_clause(inner, source)?;
                    let depth = clause
                        .head
                        .depth()
                        .max(clause.body.iter().map(Goal::depth).max().unwrap_or(0));
                    if depth > limits.max_term_depth {
                        return Err(PreceptError::consult_with_suggestion(
                            format!("clause exceeds maximum term depth {}", limits.max_term_depth),
                            span,
                            Arc::from(source),
                            "Flatten deeply nested terms in the template",
                        ));
                    }
                    program.clauses.push(freshen_wildcards_clause(clause, &mut wildcards));
                }
                _ => {}
            }
        }
    }

    Ok(program)
}

/// Parse a goal expression (a conjunction, optionally `.`-terminated).
///
/// Errors here are query errors, not consult errors: one bad goal must not
/// abort the rest of a batch.
pub fn parse_query(source: &str, limits: &ResourceLimits) -> Result<Vec<Goal>, PreceptError> {
    let pairs = PreceptParser::parse(Rule::query, source)
        .map_err(|e| PreceptError::Query(format!("parse error in goal '{}': {}", source, e.variant)))?;

    let mut wildcards = 0usize;
    for pair in pairs {
        if pair.as_rule() != Rule::query {
            continue;
        }
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::body {
                let goals = terms::build_body(inner, source).map_err(|e| match e {
                    PreceptError::Query(_) => e,
                    other => PreceptError::Query(other.to_string()),
                })?;
                if goals.iter().map(Goal::depth).max().unwrap_or(0) > limits.max_term_depth {
                    return Err(PreceptError::Query(format!(
                        "goal '{}' exceeds maximum term depth {}",
                        source, limits.max_term_depth
                    )));
                }
                let goals = goals
                    .iter()
                    .map(|g| freshen_wildcards_goal(g, &mut wildcards))
                    .collect();
                return Ok(goals);
            }
        }
    }

    Err(PreceptError::Query(format!("empty goal '{}'", source)))
}

/// Give every anonymous `_` occurrence its own fresh name so two wildcards
/// in one clause never unify with each other
fn freshen_wildcards_clause(clause: Clause, counter: &mut usize) -> Clause {
    let mut rename = |name: &str| fresh_wildcard(name, counter);
    Clause {
        head: clause.head.map_vars(&mut rename),
        body: clause.body.iter().map(|g| g.map_vars(&mut rename)).collect(),
    }
}

fn freshen_wildcards_goal(goal: &Goal, counter: &mut usize) -> Goal {
    goal.map_vars(&mut |name: &str| fresh_wildcard(name, counter))
}

fn fresh_wildcard(name: &str, counter: &mut usize) -> String {
    if name == "_" {
        *counter += 1;
        format!("_G{}", counter)
    } else {
        name.to_string()
    }
}

pub(crate) fn pair_span(pair: &Pair<Rule>) -> Span {
    let span = pair.as_span();
    let (line, col) = span.start_pos().line_col();
    Span {
        start: span.start(),
        end: span.end(),
        line,
        col,
    }
}

pub(crate) fn err_at(pair: &Pair<Rule>, source: &str, message: impl Into<String>) -> PreceptError {
    PreceptError::consult(message, pair_span(pair), Arc::from(source))
}

fn pest_to_consult(e: pest::error::Error<Rule>, source: &str) -> PreceptError {
    let (line, col) = match e.line_col {
        pest::error::LineColLocation::Pos((line, col)) => (line, col),
        pest::error::LineColLocation::Span((line, col), (_, _)) => (line, col),
    };
    let (start, end) = match e.location {
        pest::error::InputLocation::Pos(pos) => {
            let pos = pos.min(source.len());
            (pos, (pos + 1).min(source.len()))
        }
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };
    PreceptError::consult(
        format!("Parse error: {}", e.variant),
        Span {
            start,
            end,
            line,
            col,
        },
        Arc::from(source),
    )
}
