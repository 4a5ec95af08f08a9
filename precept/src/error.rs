use crate::ast::Span;
use std::fmt;
use std::sync::Arc;

/// Detailed consult error information with source location
#[derive(Debug, Clone)]
pub struct ConsultDetails {
    pub message: String,
    pub span: Span,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for the precept system
#[derive(Debug, Clone)]
pub enum PreceptError {
    /// The compiled program is not a valid logic program. Fatal for the
    /// whole validation request: no query can safely run against it.
    Consult(Box<ConsultDetails>),

    /// A module-loading directive failed during consult. Fatal, like a
    /// syntax error: the program did not finish loading.
    Module(String),

    /// One goal's resolution failed. Isolated: the orchestrator recovers
    /// and continues with the remaining goals.
    Query(String),

    /// Engine error without a specific source location
    Engine(String),

    /// A configured resource limit was exceeded
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },
}

impl PreceptError {
    /// Create a consult error with source information
    pub fn consult(message: impl Into<String>, span: Span, source_text: Arc<str>) -> Self {
        Self::Consult(Box::new(ConsultDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: None,
        }))
    }

    /// Create a consult error with a suggestion
    pub fn consult_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Consult(Box::new(ConsultDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    /// True for errors that abort the whole validation request
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PreceptError::Consult(_) | PreceptError::Module(_) | PreceptError::Engine(_)
        )
    }
}

impl fmt::Display for PreceptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreceptError::Consult(details) => {
                write!(f, "Consult error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(f, " at line {}:{}", details.span.line, details.span.col)
            }
            PreceptError::Module(msg) => write!(f, "Module error: {}", msg),
            PreceptError::Query(msg) => write!(f, "Query error: {}", msg),
            PreceptError::Engine(msg) => write!(f, "Engine error: {}", msg),
            PreceptError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
                suggestion,
            } => {
                write!(
                    f,
                    "Resource limit exceeded: {} (limit: {}, actual: {}). {}",
                    limit_name, limit_value, actual_value, suggestion
                )
            }
        }
    }
}

impl std::error::Error for PreceptError {}
