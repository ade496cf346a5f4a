//! Formula-specific error types

use thiserror::Error;

/// Errors that can occur while reading a formula schema
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulaError {
    /// Syntax errors in the formula string
    #[error("Syntax error at position {position}: {message}")]
    Syntax {
        position: usize,
        message: String,
        context: Option<String>,
    },

    /// Empty input
    #[error("Empty formula")]
    EmptyFormula,

    /// Invalid formula structure
    #[error("Invalid formula structure: {message}")]
    InvalidStructure {
        message: String,
        suggestion: Option<String>,
    },

    /// Missing response variable
    #[error("Response variable is required but not provided")]
    MissingResponse,
}

/// Result type alias for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

impl FormulaError {
    /// Create a syntax error
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        FormulaError::Syntax {
            position,
            message: message.into(),
            context: None,
        }
    }

    /// Create a syntax error with context
    pub fn syntax_with_context(
        position: usize,
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        FormulaError::Syntax {
            position,
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a structural error with a fix suggestion
    pub fn invalid_structure(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        FormulaError::InvalidStructure {
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}
