//! Coefficient names and the rules that relabel them for display

mod coefname;
mod rename;

#[cfg(test)]
mod tests;

pub use coefname::{CoefficientName, INTERACTION_SEPARATOR, NameInput};
pub use rename::NameLabels;
