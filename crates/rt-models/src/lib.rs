//! Unified summaries of fitted regression models
//!
//! Models of any family expose their estimates through
//! [`base::RegressionModel`]; [`summary::SimpleRegressionResult`] turns them
//! into one record a table writer can render side by side.

pub mod base;
pub mod error;
pub mod snapshot;
pub mod summary;

pub use base::{
    Family, LabeledStatistic, RegressionModel, RegressionStatistic, RegressionType,
    StatisticKind, StatisticRequest,
};
pub use error::{CapabilityError, ModelError};
pub use snapshot::{ModelSnapshot, SnapshotStatistics};
pub use summary::{BuildInputs, Field, RecordParts, SimpleRegressionResult, SummaryOptions};
