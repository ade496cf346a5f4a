//! Coefficient name variants

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::formula::Term;

/// Separator placed between the components of an interaction name
pub const INTERACTION_SEPARATOR: &str = " & ";

/// Name of a table row: a response, a coefficient or an absorbed effect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoefficientName {
    /// Plain textual name
    Plain(String),
    /// Level of a categorical variable, shown as `name: level`
    Categorical { name: String, level: String },
    /// Interaction of two or more names
    Interacted(Vec<CoefficientName>),
    /// Absorbed fixed effect named after its grouping variable
    FixedEffect(String),
    /// A name paired with the group it varies over, e.g. a random slope
    Grouped {
        name: Box<CoefficientName>,
        group: String,
    },
}

impl CoefficientName {
    /// Create a plain name
    pub fn plain(name: impl Into<String>) -> Self {
        CoefficientName::Plain(name.into())
    }

    /// Create a categorical level name
    pub fn categorical(name: impl Into<String>, level: impl Into<String>) -> Self {
        CoefficientName::Categorical {
            name: name.into(),
            level: level.into(),
        }
    }

    /// Create an interaction name from its components
    pub fn interacted<I, N>(parts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<CoefficientName>,
    {
        CoefficientName::Interacted(parts.into_iter().map(Into::into).collect())
    }

    /// Create a fixed-effect name
    pub fn fixed_effect(name: impl Into<String>) -> Self {
        CoefficientName::FixedEffect(name.into())
    }

    /// Pair a name with a group tag
    pub fn grouped(name: impl Into<CoefficientName>, group: impl Into<String>) -> Self {
        CoefficientName::Grouped {
            name: Box::new(name.into()),
            group: group.into(),
        }
    }

    /// Check if the name refers to an absorbed fixed effect
    pub fn is_fixed_effect(&self) -> bool {
        matches!(self, CoefficientName::FixedEffect(_))
    }

    /// Components of an interaction, or the name itself for every other variant
    pub fn components(&self) -> &[CoefficientName] {
        match self {
            CoefficientName::Interacted(parts) => parts,
            other => std::slice::from_ref(other),
        }
    }
}

impl fmt::Display for CoefficientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoefficientName::Plain(name) | CoefficientName::FixedEffect(name) => {
                write!(f, "{}", name)
            }
            CoefficientName::Categorical { name, level } => write!(f, "{}: {}", name, level),
            CoefficientName::Interacted(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", INTERACTION_SEPARATOR)?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
            CoefficientName::Grouped { name, group } => write!(f, "{} | {}", name, group),
        }
    }
}

impl From<&str> for CoefficientName {
    fn from(name: &str) -> Self {
        CoefficientName::Plain(name.to_string())
    }
}

impl From<String> for CoefficientName {
    fn from(name: String) -> Self {
        CoefficientName::Plain(name)
    }
}

impl From<&Term> for CoefficientName {
    fn from(term: &Term) -> Self {
        term.coef_name()
    }
}

impl From<Term> for CoefficientName {
    fn from(term: Term) -> Self {
        term.coef_name()
    }
}

/// Any shape a caller may use to name a response: one name or several.
///
/// Every shape collapses to a single [`CoefficientName`]; with several names
/// the first one wins.
#[derive(Debug, Clone, PartialEq)]
pub enum NameInput {
    /// A single name
    One(CoefficientName),
    /// Several names, e.g. the left-hand side of a multi-response formula
    Many(Vec<CoefficientName>),
}

impl NameInput {
    /// Collapse to the canonical single name
    pub fn into_first(self) -> Option<CoefficientName> {
        match self {
            NameInput::One(name) => Some(name),
            NameInput::Many(names) => names.into_iter().next(),
        }
    }
}

macro_rules! impl_name_input {
    ($($single:ty),*) => {
        $(
            impl From<$single> for NameInput {
                fn from(name: $single) -> Self {
                    NameInput::One(name.into())
                }
            }

            impl From<Vec<$single>> for NameInput {
                fn from(names: Vec<$single>) -> Self {
                    NameInput::Many(names.into_iter().map(Into::into).collect())
                }
            }
        )*
    };
}

impl_name_input!(CoefficientName, &str, String, Term, &Term);
