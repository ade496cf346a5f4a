//! R-style formula schema
//!
//! A formula describes which response a model explains and which terms
//! enter its right-hand side. It is only used to name table rows; no data is
//! ever evaluated against it.

pub use crate::formula::error::{FormulaError, FormulaResult};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::names::CoefficientName;

pub mod error;
mod parser;
mod term;


pub use parser::FormulaParser;
pub use term::{FIXED_EFFECT_FUNCTION, Interaction, Term, TermKind, TermType};

/// Display name of the intercept coefficient
pub const INTERCEPT_NAME: &str = "(Intercept)";

/// A parsed formula specifying a statistical model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    /// Response terms (left-hand side), usually exactly one
    pub response: Vec<Term>,

    /// Terms on the right-hand side
    pub terms: Vec<Term>,

    /// Whether to include an intercept
    pub has_intercept: bool,

    /// Original formula string
    pub original: String,
}

impl Formula {
    /// Parse a formula from a string
    pub fn parse(formula: &str) -> FormulaResult<Self> {
        FormulaParser::parse(formula)
    }

    /// Create a formula with a single response
    pub fn with_response(response: &str, terms: Vec<Term>) -> Self {
        Self {
            response: vec![Term::variable(response)],
            terms,
            has_intercept: true,
            original: String::new(),
        }
    }

    /// Create a formula without a response
    pub fn without_response(terms: Vec<Term>) -> Self {
        Self {
            response: Vec::new(),
            terms,
            has_intercept: true,
            original: String::new(),
        }
    }

    /// Remove the intercept from the formula
    pub fn without_intercept(mut self) -> Self {
        self.has_intercept = false;
        self
    }

    /// Check if formula has a response variable
    pub fn has_response(&self) -> bool {
        !self.response.is_empty()
    }

    /// The response term shown in the table header.
    ///
    /// With several responses on the left-hand side only the first is used.
    pub fn response_term(&self) -> FormulaResult<&Term> {
        self.response.first().ok_or(FormulaError::MissingResponse)
    }

    /// Right-hand side terms estimated as coefficients
    pub fn regressors(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter(|t| !t.is_fixed_effect())
    }

    /// Right-hand side terms absorbed as fixed effects
    pub fn fixed_effect_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter(|t| t.is_fixed_effect())
    }

    /// Coefficient names in estimation order: intercept first, then regressors
    pub fn coef_names(&self) -> Vec<CoefficientName> {
        let intercept = self
            .has_intercept
            .then(|| CoefficientName::from(INTERCEPT_NAME));
        intercept
            .into_iter()
            .chain(self.regressors().map(Term::coef_name))
            .collect()
    }

    /// Names of the absorbed fixed effects
    pub fn fixed_effect_names(&self) -> Vec<CoefficientName> {
        self.fixed_effect_terms().map(Term::coef_name).collect()
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> FormulaResult<Self> {
        Formula::parse(s)
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.response.is_empty() {
            write!(f, "~ ")?;
        } else {
            for (i, response) in self.response.iter().enumerate() {
                if i > 0 {
                    write!(f, " + ")?;
                }
                write!(f, "{}", response)?;
            }
            write!(f, " ~ ")?;
        }

        if self.terms.is_empty() {
            return write!(f, "{}", if self.has_intercept { "1" } else { "0" });
        }

        let mut first = true;
        if !self.has_intercept {
            write!(f, "0")?;
            first = false;
        }

        for term in &self.terms {
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{}", term)?;
            first = false;
        }

        Ok(())
    }
}
