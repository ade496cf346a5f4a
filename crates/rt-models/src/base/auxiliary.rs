//! Auxiliary data carried alongside the coefficient table

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use rt_core::CoefficientName;

/// Key under which absorbed fixed effects are stored
pub const FIXED_EFFECTS_KEY: &str = "fixed_effects";

/// Value of an auxiliary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AuxValue {
    /// Yes/no indicator, e.g. "fixed effect included"
    Flag(bool),
    /// Numeric value, e.g. a number of clusters
    Number(f64),
    /// Free text
    Text(String),
}

impl fmt::Display for AuxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuxValue::Flag(true) => write!(f, "Yes"),
            AuxValue::Flag(false) => write!(f, ""),
            AuxValue::Number(v) => write!(f, "{}", v),
            AuxValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One labeled auxiliary value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxEntry {
    /// The value shown in the table
    pub value: AuxValue,
    /// Row label; relabeled with the same rules as coefficient names
    pub label: CoefficientName,
}

impl AuxEntry {
    /// Create a new entry
    pub fn new(value: AuxValue, label: impl Into<CoefficientName>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }

    /// Entry marking a fixed effect as included
    pub fn included(label: impl Into<CoefficientName>) -> Self {
        Self::new(AuxValue::Flag(true), label)
    }
}

/// Ordered bag of auxiliary data, keyed by name
pub type OtherData = IndexMap<String, Vec<AuxEntry>>;
