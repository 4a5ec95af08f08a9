//! The embedded clause interpreter: database, unification, and the
//! backtracking solver.
//!
//! One `Database` belongs to one session and is discarded with it; nothing
//! here is shared across validation requests.

pub mod library;
pub mod solve;
pub mod unify;

pub use solve::{SolveError, Solver, Step, StepBudget};
pub use unify::{resolve, unify, walk, Subst};

use crate::ast::{Clause, Program, Term};
use crate::error::PreceptError;
use crate::parser;
use crate::resource_limits::ResourceLimits;
use std::collections::HashMap;

/// Clause storage keyed by functor and arity, preserving source order
/// within each predicate
pub struct Database {
    predicates: HashMap<(String, usize), Vec<Clause>>,
    loaded_libraries: Vec<String>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        Self {
            predicates: HashMap::new(),
            loaded_libraries: Vec::new(),
        }
    }

    /// Load a parsed program: run its directives, then add its clauses.
    ///
    /// Any failure is fatal to the load; callers must not query a database
    /// whose load returned an error.
    pub fn load(&mut self, program: &Program, limits: &ResourceLimits) -> Result<(), PreceptError> {
        for directive in &program.directives {
            self.run_directive(directive, limits)?;
        }
        for clause in &program.clauses {
            self.add_clause(clause.clone())?;
        }
        Ok(())
    }

    pub fn add_clause(&mut self, clause: Clause) -> Result<(), PreceptError> {
        let (functor, arity) = clause.head.functor().ok_or_else(|| {
            PreceptError::Engine(format!("clause head '{}' is not callable", clause.head))
        })?;
        self.predicates
            .entry((functor.to_string(), arity))
            .or_default()
            .push(clause);
        Ok(())
    }

    /// All clauses for a predicate, in the order they were added
    pub fn clauses_for(&self, functor: &str, arity: usize) -> &[Clause] {
        self.predicates
            .get(&(functor.to_string(), arity))
            .map(|clauses| clauses.as_slice())
            .unwrap_or(&[])
    }

    fn run_directive(&mut self, term: &Term, limits: &ResourceLimits) -> Result<(), PreceptError> {
        if let Term::Compound(name, args) = term {
            if name == "use_module" && args.len() == 1 {
                if let Term::Compound(lib, lib_args) = &args[0] {
                    if lib == "library" && lib_args.len() == 1 {
                        if let Term::Atom(lib_name) = &lib_args[0] {
                            return self.load_library(lib_name, limits);
                        }
                    }
                }
            }
        }
        Err(PreceptError::Module(format!(
            "unsupported directive: {}",
            term
        )))
    }

    fn load_library(&mut self, name: &str, limits: &ResourceLimits) -> Result<(), PreceptError> {
        if self.loaded_libraries.iter().any(|loaded| loaded == name) {
            return Ok(());
        }
        let source = library::source_for(name)
            .ok_or_else(|| PreceptError::Module(format!("unknown library: {}", name)))?;
        let program = parser::parse_program(source, limits)?;
        for clause in &program.clauses {
            self.add_clause(clause.clone())?;
        }
        self.loaded_libraries.push(name.to_string());
        Ok(())
    }
}
