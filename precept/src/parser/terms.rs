use super::{err_at, Rule};
use crate::ast::{Clause, CompareOp, Goal, Term};
use crate::error::PreceptError;
use pest::iterators::Pair;
use rust_decimal::Decimal;
use std::str::FromStr;

pub(crate) fn build_clause(pair: Pair<Rule>, source: &str) -> Result<Clause, PreceptError> {
    let mut inner = pair.into_inner();
    let head_pair = inner
        .next()
        .ok_or_else(|| PreceptError::Engine("malformed clause: missing head".to_string()))?;
    let head = build_callable(head_pair, source)?;
    let body = match inner.next() {
        Some(body_pair) => build_body(body_pair, source)?,
        None => Vec::new(),
    };
    Ok(Clause { head, body })
}

pub(crate) fn build_body(pair: Pair<Rule>, source: &str) -> Result<Vec<Goal>, PreceptError> {
    pair.into_inner()
        .map(|goal_pair| build_goal(goal_pair, source))
        .collect()
}

pub(crate) fn build_goal(pair: Pair<Rule>, source: &str) -> Result<Goal, PreceptError> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| PreceptError::Engine("malformed goal".to_string()))?;
    match inner.as_rule() {
        Rule::negation => {
            let negated = inner
                .into_inner()
                .next()
                .ok_or_else(|| PreceptError::Engine("malformed negation".to_string()))?;
            let goals = match negated.as_rule() {
                Rule::paren_body => build_body(negated, source)?,
                Rule::goal => vec![build_goal(negated, source)?],
                _ => {
                    return Err(err_at(&negated, source, "unexpected negated goal"));
                }
            };
            Ok(Goal::Not(goals))
        }
        Rule::comparison => {
            let mut parts = inner.into_inner();
            let lhs_pair = parts
                .next()
                .ok_or_else(|| PreceptError::Engine("malformed comparison".to_string()))?;
            let op_pair = parts
                .next()
                .ok_or_else(|| PreceptError::Engine("malformed comparison".to_string()))?;
            let rhs_pair = parts
                .next()
                .ok_or_else(|| PreceptError::Engine("malformed comparison".to_string()))?;
            let op = match op_pair.as_str() {
                "<" => CompareOp::Lt,
                ">" => CompareOp::Gt,
                "=<" => CompareOp::Le,
                ">=" => CompareOp::Ge,
                "=:=" => CompareOp::NumEq,
                "=\\=" => CompareOp::NumNe,
                other => {
                    return Err(err_at(
                        &op_pair,
                        source,
                        format!("unknown comparison operator '{}'", other),
                    ));
                }
            };
            Ok(Goal::Comparison {
                op,
                lhs: build_arith(lhs_pair, source)?,
                rhs: build_arith(rhs_pair, source)?,
            })
        }
        Rule::unification => {
            let mut parts = inner.into_inner();
            let a = build_term(
                parts
                    .next()
                    .ok_or_else(|| PreceptError::Engine("malformed unification".to_string()))?,
                source,
            )?;
            let b = build_term(
                parts
                    .next()
                    .ok_or_else(|| PreceptError::Engine("malformed unification".to_string()))?,
                source,
            )?;
            Ok(Goal::Unify(a, b))
        }
        Rule::callable => {
            let term = build_callable(inner, source)?;
            if term == Term::Atom("true".to_string()) {
                Ok(Goal::True)
            } else {
                Ok(Goal::Call(term))
            }
        }
        _ => Err(err_at(&inner, source, "unexpected goal")),
    }
}

pub(crate) fn build_callable(pair: Pair<Rule>, source: &str) -> Result<Term, PreceptError> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| PreceptError::Engine("malformed callable".to_string()))?;
    match inner.as_rule() {
        Rule::compound => build_compound(inner, source),
        Rule::atom => build_atom(inner),
        _ => Err(err_at(&inner, source, "expected a callable term")),
    }
}

pub(crate) fn build_term(pair: Pair<Rule>, source: &str) -> Result<Term, PreceptError> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| PreceptError::Engine("malformed term".to_string()))?;
    match inner.as_rule() {
        Rule::compound => build_compound(inner, source),
        Rule::list => build_list(inner, source),
        Rule::number => {
            let text = inner.as_str();
            Decimal::from_str(text)
                .map(Term::Number)
                .map_err(|_| err_at(&inner, source, format!("invalid number '{}'", text)))
        }
        Rule::variable => Ok(Term::Var(inner.as_str().to_string())),
        Rule::atom => build_atom(inner),
        _ => Err(err_at(&inner, source, "unexpected term")),
    }
}

fn build_compound(pair: Pair<Rule>, source: &str) -> Result<Term, PreceptError> {
    let mut inner = pair.into_inner();
    let name_pair = inner
        .next()
        .ok_or_else(|| PreceptError::Engine("malformed compound: missing functor".to_string()))?;
    let functor = name_pair.as_str().to_string();
    let args = inner
        .map(|arg| build_term(arg, source))
        .collect::<Result<Vec<Term>, PreceptError>>()?;
    Ok(Term::Compound(functor, args))
}

fn build_list(pair: Pair<Rule>, source: &str) -> Result<Term, PreceptError> {
    let Some(items_pair) = pair.into_inner().next() else {
        return Ok(Term::Nil);
    };
    let mut items = Vec::new();
    let mut tail = None;
    for part in items_pair.into_inner() {
        match part.as_rule() {
            Rule::term => items.push(build_term(part, source)?),
            Rule::list_tail => {
                let tail_pair = part
                    .into_inner()
                    .next()
                    .ok_or_else(|| PreceptError::Engine("malformed list tail".to_string()))?;
                tail = Some(build_term(tail_pair, source)?);
            }
            _ => {
                return Err(err_at(&part, source, "unexpected list element"));
            }
        }
    }
    Ok(Term::list(items, tail))
}

fn build_atom(pair: Pair<Rule>) -> Result<Term, PreceptError> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| PreceptError::Engine("malformed atom".to_string()))?;
    match inner.as_rule() {
        Rule::quoted_atom => {
            let chars_pair = inner
                .into_inner()
                .next()
                .ok_or_else(|| PreceptError::Engine("malformed quoted atom".to_string()))?;
            Ok(Term::Atom(unescape(chars_pair.as_str())))
        }
        Rule::atom_name => Ok(Term::Atom(inner.as_str().to_string())),
        _ => Err(PreceptError::Engine("unexpected atom".to_string())),
    }
}

fn build_arith(pair: Pair<Rule>, source: &str) -> Result<Term, PreceptError> {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| PreceptError::Engine("malformed arithmetic expression".to_string()))?;
    let mut acc = build_arith_term(first, source)?;
    while let Some(op_pair) = inner.next() {
        let rhs_pair = inner
            .next()
            .ok_or_else(|| PreceptError::Engine("malformed arithmetic expression".to_string()))?;
        let rhs = build_arith_term(rhs_pair, source)?;
        acc = Term::Compound(op_pair.as_str().to_string(), vec![acc, rhs]);
    }
    Ok(acc)
}

fn build_arith_term(pair: Pair<Rule>, source: &str) -> Result<Term, PreceptError> {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| PreceptError::Engine("malformed arithmetic term".to_string()))?;
    let mut acc = build_arith_factor(first, source)?;
    while let Some(op_pair) = inner.next() {
        let rhs_pair = inner
            .next()
            .ok_or_else(|| PreceptError::Engine("malformed arithmetic term".to_string()))?;
        let rhs = build_arith_factor(rhs_pair, source)?;
        acc = Term::Compound(op_pair.as_str().to_string(), vec![acc, rhs]);
    }
    Ok(acc)
}

fn build_arith_factor(pair: Pair<Rule>, source: &str) -> Result<Term, PreceptError> {
    match pair.as_rule() {
        Rule::paren_arith => {
            let inner = pair
                .into_inner()
                .next()
                .ok_or_else(|| PreceptError::Engine("malformed parenthesized expression".to_string()))?;
            build_arith(inner, source)
        }
        Rule::term => build_term(pair, source),
        _ => Err(err_at(&pair, source, "unexpected arithmetic operand")),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
