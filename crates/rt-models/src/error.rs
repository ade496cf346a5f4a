//! Model-related error types

use thiserror::Error;

use rt_core::FormulaError;

/// Errors that abort construction of a regression record
#[derive(Debug, Error)]
pub enum ModelError {
    /// Formula parsing or schema error
    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),

    /// Coefficient-aligned sequences disagree in length
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Sequence whose length is wrong
        what: &'static str,
        /// Number of coefficients
        expected: usize,
        /// Length actually found
        actual: usize,
    },

    /// A capability every model must provide failed
    #[error("Model does not provide required capability '{capability}': {reason}")]
    MissingCapability {
        /// Name of the capability
        capability: &'static str,
        /// Why it failed
        reason: String,
    },

    /// Numerical computation error
    #[error("Numerical error: {message} (operation: {operation})")]
    NumericalError {
        /// Error message
        message: String,
        /// Operation that failed
        operation: String,
    },

    /// Invalid summary configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Configuration error message
        message: String,
    },
}

impl ModelError {
    /// Create a missing-capability error
    pub fn missing(capability: &'static str, reason: impl Into<String>) -> Self {
        ModelError::MissingCapability {
            capability,
            reason: reason.into(),
        }
    }

    /// Create a dimension-mismatch error
    pub fn dimension(what: &'static str, expected: usize, actual: usize) -> Self {
        ModelError::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }
}

/// Failure of an optional model capability.
///
/// These never abort a summary: the statistic registry turns them into
/// unavailable values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CapabilityError {
    /// The model type does not implement the capability
    #[error("'{0}' is not supported by this model")]
    Unsupported(&'static str),

    /// The capability exists but an input it needs is missing
    #[error("'{capability}' requires '{requires}'")]
    MissingInput {
        /// Requested capability
        capability: &'static str,
        /// Input that was unavailable
        requires: &'static str,
    },

    /// The computation produced an unusable number
    #[error("Numerical error in '{capability}': {message}")]
    Numerical {
        /// Requested capability
        capability: &'static str,
        /// What went wrong
        message: String,
    },
}

impl CapabilityError {
    /// Create a numerical capability error
    pub fn numerical(capability: &'static str, message: impl Into<String>) -> Self {
        CapabilityError::Numerical {
            capability,
            message: message.into(),
        }
    }
}

/// Result of an optional capability
pub type CapabilityResult<T> = std::result::Result<T, CapabilityError>;
