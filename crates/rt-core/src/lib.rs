//! Core building blocks for RegTable
//!
//! - [`formula`]: R-style formula schema describing a model's response and terms
//! - [`names`]: coefficient names and the relabeling rules applied before display

pub mod formula;
pub mod names;

pub use formula::{Formula, FormulaError, FormulaResult, Term};
pub use names::{CoefficientName, NameInput, NameLabels};
