//! # Precept Engine
//!
//! **Compliance questionnaires you can prove**
//!
//! Precept validates regulatory compliance questionnaires by compiling a
//! form definition plus its answers into a Horn-clause logic program and
//! resolving a batch of derived boolean queries against it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use precept::{Engine, Form, PreceptResult, Responses};
//!
//! fn main() -> PreceptResult<()> {
//!     let form: Form = serde_json::from_str(r#"{
//!         "questions": [{"id": "q1", "type": "BOOLEAN"}],
//!         "facts": [{"question_id": "q1", "template": "has_license({1})"}],
//!         "queries": [{"query": "?- has_license(true)",
//!                      "description": "Facility holds a license"}]
//!     }"#).expect("well-formed form");
//!
//!     let mut responses = Responses::new();
//!     responses.insert("q1".to_string(), "true".to_string());
//!
//!     let engine = Engine::new();
//!     let result = engine.validate(&form, &responses)?;
//!     assert_eq!(result.passed, vec![true]);
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Forms
//! A form pairs questions with logic templates: fact clauses governed by
//! one question each, validation rules, and the queries to prove.
//!
//! ### Compilation
//! Answers are encoded into logic literals and substituted into the
//! templates, producing one program per request. Questions answered
//! "Does not apply" skip their queries entirely.
//!
//! ### Resolution
//! A fresh interpreter session consults the program once and resolves the
//! remaining queries in order. One bad goal fails its own row and nothing
//! else; a malformed program fails the whole request.

pub mod ast;
pub mod compiler;
pub mod encode;
pub mod engine;
pub mod error;
pub mod form;
pub mod machine;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod session;

pub use ast::{Clause, CompareOp, Goal, Program, Span, Term};
pub use compiler::{compile, Compiled, PlanEntry, QueryPlan, PROGRAM_PREAMBLE};
pub use encode::encode;
pub use engine::Engine;
pub use error::{ConsultDetails, PreceptError};
pub use form::{
    is_not_applicable, FactTemplate, Form, Question, QuestionKind, QueryTemplate, Responses,
    RuleTemplate, NOT_APPLICABLE,
};
pub use parser::{parse_program, parse_query};
pub use resource_limits::ResourceLimits;
pub use response::{QueryOutcome, ValidationResult};
pub use session::{Answer, ResolveOutcome, Session};

/// Result type for precept operations
pub type PreceptResult<T> = Result<T, PreceptError>;

#[cfg(test)]
mod tests;
