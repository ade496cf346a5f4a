//! Summary configuration

use serde::{Deserialize, Serialize};

use rt_core::NameLabels;

use crate::base::StatisticRequest;

/// Options controlling how a model is summarized
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Statistics to show; `None` uses the defaults of the regression type
    #[serde(default)]
    pub statistics: Option<Vec<StatisticRequest>>,
    /// Report coefficients in standard-deviation units
    #[serde(default)]
    pub standardize: bool,
    /// Relabeling rules for response, coefficient and auxiliary names
    #[serde(default)]
    pub labels: NameLabels,
}

impl SummaryOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the statistics to show, in order
    pub fn with_statistics<I, S>(mut self, statistics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StatisticRequest>,
    {
        self.statistics = Some(statistics.into_iter().map(Into::into).collect());
        self
    }

    /// Report standardized coefficients
    pub fn standardized(mut self) -> Self {
        self.standardize = true;
        self
    }

    /// Set the relabeling rules
    pub fn with_labels(mut self, labels: NameLabels) -> Self {
        self.labels = labels;
        self
    }
}
