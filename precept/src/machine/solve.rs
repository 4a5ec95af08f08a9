//! Depth-first clause resolution with backtracking.
//!
//! The solver keeps an explicit stack of alternative branches; each branch
//! carries its remaining goals and its own substitution, so abandoning a
//! branch never needs an undo trail. Programs here are small questionnaire
//! compilations, which keeps the cloned substitutions cheap.

use super::unify::{resolve, unify, walk, Subst};
use super::Database;
use crate::ast::{Clause, CompareOp, Goal, Term};
use rust_decimal::Decimal;
use std::fmt;

/// Inference-step budget for one query.
///
/// Every branch expansion costs one step. Exhaustion surfaces as
/// `Step::OutOfFuel`, the bounded-resource cancellation mechanism.
#[derive(Debug, Clone)]
pub struct StepBudget {
    limit: usize,
    used: usize,
}

impl StepBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    pub fn tick(&mut self) -> bool {
        if self.used >= self.limit {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn used(&self) -> usize {
        self.used
    }
}

/// One pull from the solver
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A solution was found; the substitution covers the query's variables
    Solution(Subst),
    /// No further solutions exist
    Exhausted,
    /// The step budget ran out before a decision was reached
    OutOfFuel,
}

/// An error raised while resolving a goal. Isolated to the goal that
/// raised it; the session catches it and moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// A goal or arithmetic operand was an unbound variable
    Instantiation(String),
    /// A term could not be evaluated numerically
    Evaluation(String),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Instantiation(what) => {
                write!(f, "arguments are not sufficiently instantiated: {}", what)
            }
            SolveError::Evaluation(what) => write!(f, "cannot evaluate: {}", what),
        }
    }
}

struct Branch {
    /// Remaining goals, last element is the next to run
    goals: Vec<Goal>,
    subst: Subst,
}

/// Backtracking resolver for one query. Pull solutions with [`Solver::next`].
pub struct Solver {
    branches: Vec<Branch>,
}

impl Solver {
    /// Start a solver for a conjunction of goals with no prior bindings
    pub fn for_goals(goals: &[Goal]) -> Self {
        Self::seeded(goals, Subst::new())
    }

    fn seeded(goals: &[Goal], subst: Subst) -> Self {
        let goals = goals.iter().rev().cloned().collect();
        Self {
            branches: vec![Branch { goals, subst }],
        }
    }

    /// Run until the next solution, exhaustion, or fuel runs out.
    ///
    /// `rename` is the shared clause-renaming counter; sub-solvers (negation)
    /// share it so activations never collide across nesting levels.
    pub fn next(
        &mut self,
        db: &Database,
        budget: &mut StepBudget,
        rename: &mut usize,
    ) -> Result<Step, SolveError> {
        loop {
            let Some(mut branch) = self.branches.pop() else {
                return Ok(Step::Exhausted);
            };
            if !budget.tick() {
                return Ok(Step::OutOfFuel);
            }
            let Some(goal) = branch.goals.pop() else {
                return Ok(Step::Solution(branch.subst));
            };
            match goal {
                Goal::True => self.branches.push(branch),
                Goal::Unify(a, b) => {
                    if unify(&a, &b, &mut branch.subst) {
                        self.branches.push(branch);
                    }
                }
                Goal::Comparison { op, lhs, rhs } => {
                    let l = eval_arith(&branch.subst, &lhs)?;
                    let r = eval_arith(&branch.subst, &rhs)?;
                    if compare(op, l, r) {
                        self.branches.push(branch);
                    }
                }
                Goal::Not(inner) => {
                    let mut sub = Solver::seeded(&inner, branch.subst.clone());
                    match sub.next(db, budget, rename)? {
                        Step::Solution(_) => {}
                        Step::Exhausted => self.branches.push(branch),
                        Step::OutOfFuel => return Ok(Step::OutOfFuel),
                    }
                }
                Goal::Call(term) => {
                    let called = resolve(&branch.subst, &term);
                    let (functor, arity) = match called.functor() {
                        Some(key) => key,
                        None => {
                            if let Term::Var(name) = walk(&branch.subst, &called) {
                                return Err(SolveError::Instantiation(name.clone()));
                            }
                            return Err(SolveError::Evaluation(format!(
                                "'{}' is not callable",
                                called
                            )));
                        }
                    };
                    // push alternatives in reverse so the first clause is
                    // explored first
                    for clause in db.clauses_for(functor, arity).iter().rev() {
                        *rename += 1;
                        let activated = rename_clause(clause, *rename);
                        let mut subst = branch.subst.clone();
                        if unify(&called, &activated.head, &mut subst) {
                            let mut goals = branch.goals.clone();
                            for g in activated.body.iter().rev() {
                                goals.push(g.clone());
                            }
                            self.branches.push(Branch { goals, subst });
                        }
                    }
                }
            }
        }
    }
}

fn rename_clause(clause: &Clause, id: usize) -> Clause {
    let mut rename = |name: &str| format!("{}~{}", name, id);
    Clause {
        head: clause.head.map_vars(&mut rename),
        body: clause.body.iter().map(|g| g.map_vars(&mut rename)).collect(),
    }
}

fn eval_arith(subst: &Subst, term: &Term) -> Result<Decimal, SolveError> {
    match walk(subst, term).clone() {
        Term::Number(n) => Ok(n),
        Term::Var(name) => Err(SolveError::Instantiation(name)),
        Term::Compound(op, args) if args.len() == 2 && is_arith_op(&op) => {
            let l = eval_arith(subst, &args[0])?;
            let r = eval_arith(subst, &args[1])?;
            let result = match op.as_str() {
                "+" => l.checked_add(r),
                "-" => l.checked_sub(r),
                "*" => l.checked_mul(r),
                "/" => {
                    if r.is_zero() {
                        return Err(SolveError::Evaluation("zero divisor".to_string()));
                    }
                    l.checked_div(r)
                }
                _ => unreachable!(),
            };
            result.ok_or_else(|| SolveError::Evaluation(format!("{} {} {} overflows", l, op, r)))
        }
        other => Err(SolveError::Evaluation(format!(
            "'{}' is not a number",
            other
        ))),
    }
}

fn is_arith_op(op: &str) -> bool {
    matches!(op, "+" | "-" | "*" | "/")
}

fn compare(op: CompareOp, l: Decimal, r: Decimal) -> bool {
    match op {
        CompareOp::Lt => l < r,
        CompareOp::Gt => l > r,
        CompareOp::Le => l <= r,
        CompareOp::Ge => l >= r,
        CompareOp::NumEq => l == r,
        CompareOp::NumNe => l != r,
    }
}
