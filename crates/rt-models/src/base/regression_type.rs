//! Estimator classification shown in the "Estimator" row of a table

use serde::{Deserialize, Serialize};
use std::fmt;

use super::render::RenderContext;

/// Distribution family of a (generalized) linear model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Family {
    /// Gaussian errors
    Normal,
    /// Binomial / logistic
    Binomial,
    /// Poisson counts
    Poisson,
    /// Gamma
    Gamma,
    /// Negative binomial counts
    NegativeBinomial,
    /// Inverse Gaussian
    InverseGaussian,
    /// Other family
    Other(String),
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Normal => write!(f, "Normal"),
            Family::Binomial => write!(f, "Binomial"),
            Family::Poisson => write!(f, "Poisson"),
            Family::Gamma => write!(f, "Gamma"),
            Family::NegativeBinomial => write!(f, "Negative Binomial"),
            Family::InverseGaussian => write!(f, "Inverse Gaussian"),
            Family::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Regression type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegressionType {
    /// Model with a distribution family, optionally instrumented
    Family {
        /// Error distribution
        family: Family,
        /// Whether endogenous regressors are instrumented
        instrumental: bool,
    },
    /// Generic nonlinear model
    NonLinear,
    /// Caller-defined tag, shown verbatim
    Custom(String),
}

impl RegressionType {
    /// Ordinary least squares
    pub fn ols() -> Self {
        RegressionType::Family {
            family: Family::Normal,
            instrumental: false,
        }
    }

    /// Linear instrumental-variables regression
    pub fn iv() -> Self {
        RegressionType::Family {
            family: Family::Normal,
            instrumental: true,
        }
    }

    /// Generalized linear model with the given family
    pub fn glm(family: Family) -> Self {
        RegressionType::Family {
            family,
            instrumental: false,
        }
    }

    /// Default classification: OLS for linear models, nonlinear otherwise
    pub fn from_linearity(is_linear: bool) -> Self {
        if is_linear {
            Self::ols()
        } else {
            RegressionType::NonLinear
        }
    }

    /// Check if the model is instrumented
    pub fn is_instrumental(&self) -> bool {
        matches!(
            self,
            RegressionType::Family {
                instrumental: true,
                ..
            }
        )
    }

    /// Row label for the type, e.g. "Estimator"
    pub fn label(&self, ctx: &dyn RenderContext) -> String {
        ctx.estimator_label()
    }
}

impl Default for RegressionType {
    fn default() -> Self {
        Self::ols()
    }
}

impl fmt::Display for RegressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionType::Family {
                instrumental: true,
                ..
            } => write!(f, "IV"),
            RegressionType::Family {
                family: Family::Normal,
                ..
            } => write!(f, "OLS"),
            RegressionType::Family { family, .. } => write!(f, "{}", family),
            RegressionType::NonLinear => write!(f, "NL"),
            RegressionType::Custom(s) => write!(f, "{}", s),
        }
    }
}
