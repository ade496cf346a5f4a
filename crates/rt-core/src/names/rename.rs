//! Renaming rules for coefficient and response names

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::CoefficientName;

/// Caller-supplied relabeling rules.
///
/// `exact` maps a full name to its display label and always takes precedence.
/// `substitutions` are substring replacements applied one after another, in
/// insertion order, to names without an exact label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameLabels {
    /// Full-name replacements
    #[serde(default)]
    pub exact: IndexMap<String, String>,
    /// Ordered substring replacements
    #[serde(default)]
    pub substitutions: IndexMap<String, String>,
}

impl NameLabels {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-match label
    pub fn with_label(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.exact.insert(name.into(), label.into());
        self
    }

    /// Add a substring substitution, applied after those already present
    pub fn with_substitution(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.substitutions.insert(old.into(), new.into());
        self
    }

    /// Check if no rule is configured
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.substitutions.is_empty()
    }

    /// Rename raw text
    pub fn rename_str(&self, name: &str) -> String {
        match self.exact.get(name) {
            Some(label) => label.clone(),
            None => self.substitute(name),
        }
    }

    /// Rename a coefficient name.
    ///
    /// An exact label for the whole display form wins outright. Otherwise only
    /// substitutions are applied, to each textual component; the group of a
    /// [`CoefficientName::Grouped`] name is left untouched.
    pub fn rename(&self, name: &CoefficientName) -> CoefficientName {
        if let Some(label) = self.exact.get(&name.to_string()) {
            return match name {
                CoefficientName::FixedEffect(_) => CoefficientName::FixedEffect(label.clone()),
                _ => CoefficientName::Plain(label.clone()),
            };
        }

        match name {
            CoefficientName::Grouped { name, group } => CoefficientName::Grouped {
                name: Box::new(self.rename(name)),
                group: group.clone(),
            },
            other => self.substitute_name(other),
        }
    }

    /// Rename an optional name; `None` passes through
    pub fn rename_opt(&self, name: Option<&CoefficientName>) -> Option<CoefficientName> {
        name.map(|n| self.rename(n))
    }

    /// Rename every name of a slice, keeping order
    pub fn rename_all(&self, names: &[CoefficientName]) -> Vec<CoefficientName> {
        names.iter().map(|n| self.rename(n)).collect()
    }

    fn substitute(&self, text: &str) -> String {
        self.substitutions
            .iter()
            .filter(|(old, _)| !old.is_empty())
            .fold(text.to_string(), |acc, (old, new)| acc.replace(old.as_str(), new))
    }

    /// Substitutions only, applied to every component
    fn substitute_name(&self, name: &CoefficientName) -> CoefficientName {
        match name {
            CoefficientName::Plain(text) => CoefficientName::Plain(self.substitute(text)),
            CoefficientName::Categorical { name, level } => CoefficientName::Categorical {
                name: self.substitute(name),
                level: self.substitute(level),
            },
            CoefficientName::Interacted(parts) => {
                CoefficientName::Interacted(parts.iter().map(|p| self.substitute_name(p)).collect())
            }
            CoefficientName::FixedEffect(text) => CoefficientName::FixedEffect(self.substitute(text)),
            CoefficientName::Grouped { name, group } => CoefficientName::Grouped {
                name: Box::new(self.substitute_name(name)),
                group: group.clone(),
            },
        }
    }
}
