//! Unified regression summaries
//!
//! [`SimpleRegressionResult`] gathers everything a side-by-side regression
//! table needs from one fitted model: names, estimates, standard errors,
//! p-values, summary statistics and auxiliary rows such as fixed effects.

mod options;
mod record;


pub use options::SummaryOptions;
pub use record::{BuildInputs, Field, RecordParts, SimpleRegressionResult};
