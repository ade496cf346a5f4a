//! Term types for formula specification
//!
//! This module defines the types representing terms in a formula,
//! such as variables, interactions, function applications and
//! absorbed fixed effects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::names::CoefficientName;

/// Name of the marker function used for absorbed fixed effects, as in `fe(state)`
pub const FIXED_EFFECT_FUNCTION: &str = "fe";

/// Type of term in a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermType {
    /// Main effect
    Main,
    /// Interaction effect
    Interaction,
    /// Function application
    Function,
    /// Absorbed fixed effect, never estimated as a coefficient
    FixedEffect,
}

/// Kind of term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TermKind {
    /// Simple variable
    Variable(String),
    /// Numeric literal, only meaningful as a function argument
    Literal(String),
    /// Interaction between factors
    Interaction(Interaction),
    /// Function application
    Function { name: String, args: Vec<Term> },
}

/// A term in a formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// The kind of term
    pub kind: TermKind,
    /// Type of term
    pub term_type: TermType,
}

impl Term {
    /// Create a new variable term
    pub fn variable(name: &str) -> Self {
        Self {
            kind: TermKind::Variable(name.to_string()),
            term_type: TermType::Main,
        }
    }

    /// Create a numeric literal term
    pub fn literal(text: &str) -> Self {
        Self {
            kind: TermKind::Literal(text.to_string()),
            term_type: TermType::Main,
        }
    }

    /// Create a new interaction term
    pub fn interaction(factors: Vec<Term>) -> Self {
        Self {
            kind: TermKind::Interaction(Interaction::new(factors)),
            term_type: TermType::Interaction,
        }
    }

    /// Create a new function term
    ///
    /// `fe(x)` is classified as a fixed effect rather than a function.
    pub fn function(name: &str, args: Vec<Term>) -> Self {
        let term_type = if name == FIXED_EFFECT_FUNCTION && args.len() == 1 {
            TermType::FixedEffect
        } else {
            TermType::Function
        };
        Self {
            kind: TermKind::Function {
                name: name.to_string(),
                args,
            },
            term_type,
        }
    }

    /// Create a fixed-effect term `fe(name)`
    pub fn fixed_effect(name: &str) -> Self {
        Self::function(FIXED_EFFECT_FUNCTION, vec![Term::variable(name)])
    }

    /// Check if the term is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self.kind, TermKind::Variable(_))
    }

    /// Check if the term is an interaction
    pub fn is_interaction(&self) -> bool {
        matches!(self.kind, TermKind::Interaction(_))
    }

    /// Check if the term is a function
    pub fn is_function(&self) -> bool {
        matches!(self.kind, TermKind::Function { .. })
    }

    /// Check if the term is an absorbed fixed effect
    pub fn is_fixed_effect(&self) -> bool {
        self.term_type == TermType::FixedEffect
    }

    /// Get variable name if this is a variable term
    pub fn as_variable(&self) -> Option<&str> {
        if let TermKind::Variable(name) = &self.kind {
            Some(name)
        } else {
            None
        }
    }

    /// Get interaction if this is an interaction term
    pub fn as_interaction(&self) -> Option<&Interaction> {
        if let TermKind::Interaction(interaction) = &self.kind {
            Some(interaction)
        } else {
            None
        }
    }

    /// Name of the grouping variable if this is a fixed-effect term
    pub fn fixed_effect_variable(&self) -> Option<String> {
        match (&self.kind, self.term_type) {
            (TermKind::Function { args, .. }, TermType::FixedEffect) => {
                args.first().map(|arg| arg.to_string())
            }
            _ => None,
        }
    }

    /// Convert the term into the name it carries in a coefficient table
    pub fn coef_name(&self) -> CoefficientName {
        match &self.kind {
            TermKind::Interaction(interaction) => CoefficientName::Interacted(
                interaction.factors.iter().map(Term::coef_name).collect(),
            ),
            _ => match self.fixed_effect_variable() {
                Some(variable) => CoefficientName::FixedEffect(variable),
                None => CoefficientName::Plain(self.to_string()),
            },
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TermKind::Variable(name) | TermKind::Literal(name) => write!(f, "{}", name),
            TermKind::Interaction(interaction) => write!(f, "{}", interaction),
            TermKind::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Interaction between two or more factors, written `a:b` in a formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Factors involved in the interaction
    pub factors: Vec<Term>,
    /// Order of interaction (2-way, 3-way, etc.)
    pub order: usize,
}

impl Interaction {
    /// Create a new interaction
    pub fn new(factors: Vec<Term>) -> Self {
        let order = factors.len();
        Self { factors, order }
    }

    /// Names of the plain variables taking part in the interaction
    pub fn variables(&self) -> Vec<&str> {
        self.factors.iter().filter_map(Term::as_variable).collect()
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, factor) in self.factors.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{}", factor)?;
        }
        Ok(())
    }
}
