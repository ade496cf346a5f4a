//! Registry of summary statistics shown below the coefficient table
//!
//! Every [`StatisticKind`] knows how to pull its value out of a
//! [`RegressionModel`] and how to label itself. Extraction failures never
//! escape: [`RegressionStatistic::construct`] is the one place where a failed
//! capability becomes an unavailable value.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::regression_type::{Family, RegressionType};
use super::render::{AsciiRender, RenderContext};
use super::{PseudoR2, RegressionModel};
use crate::error::CapabilityResult;

/// Kinds of regression statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatisticKind {
    /// Number of observations
    Nobs,
    /// R²
    R2,
    /// McFadden pseudo-R²
    R2McFadden,
    /// Cox-Snell pseudo-R²
    R2CoxSnell,
    /// Nagelkerke pseudo-R²
    R2Nagelkerke,
    /// Deviance-ratio pseudo-R²
    R2Deviance,
    /// Adjusted R²
    AdjR2,
    /// Adjusted McFadden pseudo-R²
    AdjR2McFadden,
    /// Adjusted deviance-ratio pseudo-R²
    AdjR2Deviance,
    /// Model degrees of freedom
    Dof,
    /// Log-likelihood
    LogLikelihood,
    /// Akaike information criterion
    Aic,
    /// Corrected Akaike information criterion
    Aicc,
    /// Bayesian information criterion
    Bic,
    /// Model F-statistic
    FStat,
    /// p-value of the model F-statistic
    FStatPValue,
    /// First-stage F-statistic (instrumented models)
    FStatIv,
    /// p-value of the first-stage F-statistic
    FStatIvPValue,
    /// Within R² (fixed-effect models)
    R2Within,
}

/// The conventional pseudo-R²
pub const PSEUDO_R2: StatisticKind = StatisticKind::R2McFadden;

/// The conventional adjusted pseudo-R²
pub const ADJ_PSEUDO_R2: StatisticKind = StatisticKind::AdjR2McFadden;

impl StatisticKind {
    /// Every registered kind, in display order
    pub const ALL: [StatisticKind; 19] = [
        StatisticKind::Nobs,
        StatisticKind::R2,
        StatisticKind::R2McFadden,
        StatisticKind::R2CoxSnell,
        StatisticKind::R2Nagelkerke,
        StatisticKind::R2Deviance,
        StatisticKind::AdjR2,
        StatisticKind::AdjR2McFadden,
        StatisticKind::AdjR2Deviance,
        StatisticKind::Dof,
        StatisticKind::LogLikelihood,
        StatisticKind::Aic,
        StatisticKind::Aicc,
        StatisticKind::Bic,
        StatisticKind::FStat,
        StatisticKind::FStatPValue,
        StatisticKind::FStatIv,
        StatisticKind::FStatIvPValue,
        StatisticKind::R2Within,
    ];

    /// Whether values of this kind are counts
    pub fn is_integer(self) -> bool {
        matches!(self, StatisticKind::Nobs | StatisticKind::Dof)
    }

    /// Pull the raw value out of a model
    fn extract<M: RegressionModel + ?Sized>(self, model: &M) -> CapabilityResult<f64> {
        use StatisticKind::*;

        match self {
            Nobs => model.nobs().map(|n| n as f64),
            R2 => model.r2(),
            R2McFadden => model.pseudo_r2(PseudoR2::McFadden),
            R2CoxSnell => model.pseudo_r2(PseudoR2::CoxSnell),
            R2Nagelkerke => model.pseudo_r2(PseudoR2::Nagelkerke),
            R2Deviance => model.pseudo_r2(PseudoR2::DevianceRatio),
            AdjR2 => model.adj_r2(),
            AdjR2McFadden => model.adj_pseudo_r2(PseudoR2::McFadden),
            AdjR2Deviance => model.adj_pseudo_r2(PseudoR2::DevianceRatio),
            Dof => model.dof().map(|k| k as f64),
            LogLikelihood => model.log_likelihood(),
            Aic => model.aic(),
            Aicc => model.aicc(),
            Bic => model.bic(),
            FStat => model.f_statistic(),
            FStatPValue => model.f_pvalue(),
            FStatIv => model.f_statistic_iv(),
            FStatIvPValue => model.f_pvalue_iv(),
            R2Within => model.r2_within(),
        }
    }

    /// Display label in the given render context
    pub fn label(self, ctx: &dyn RenderContext) -> String {
        use StatisticKind::*;

        if let Some(label) = ctx.label_override(self) {
            return label;
        }

        match self {
            Nobs => ctx.nobs(),
            R2 => ctx.r2(),
            R2McFadden => format!("McFadden {}", R2.label(ctx)),
            R2CoxSnell => format!("Cox-Snell {}", R2.label(ctx)),
            R2Nagelkerke => format!("Nagelkerke {}", R2.label(ctx)),
            R2Deviance => format!("Deviance {}", R2.label(ctx)),
            AdjR2 => format!("Adjusted {}", R2.label(ctx)),
            AdjR2McFadden => format!("McFadden {}", AdjR2.label(ctx)),
            AdjR2Deviance => format!("Deviance {}", AdjR2.label(ctx)),
            Dof => "Degrees of Freedom".to_string(),
            LogLikelihood => "Log Likelihood".to_string(),
            Aic => "AIC".to_string(),
            Aicc => "AICC".to_string(),
            Bic => "BIC".to_string(),
            FStat => "F".to_string(),
            FStatPValue => "F-test p value".to_string(),
            FStatIv => "First-stage F statistic".to_string(),
            FStatIvPValue => "First-stage p value".to_string(),
            R2Within => format!("Within-{}", R2.label(ctx)),
        }
    }
}

/// A statistic value; `None` means "not applicable to this model"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionStatistic {
    /// Which statistic
    pub kind: StatisticKind,
    /// Its value, if the model could provide one
    pub value: Option<f64>,
}

impl RegressionStatistic {
    /// Wrap a precomputed value
    pub fn new(kind: StatisticKind, value: f64) -> Self {
        Self {
            kind,
            value: Some(value),
        }
    }

    /// An unavailable statistic
    pub fn unavailable(kind: StatisticKind) -> Self {
        Self { kind, value: None }
    }

    /// Extract `kind` from `model`.
    ///
    /// Never fails: unsupported capabilities, missing inputs and non-finite
    /// results all produce an unavailable statistic.
    pub fn construct<M: RegressionModel + ?Sized>(kind: StatisticKind, model: &M) -> Self {
        let value = match kind.extract(model) {
            Ok(v) if v.is_finite() => Some(v),
            Ok(v) => {
                log::debug!("{:?} is not finite ({}), leaving it blank", kind, v);
                None
            }
            Err(err) => {
                log::debug!("{:?} unavailable: {}", kind, err);
                None
            }
        };
        Self { kind, value }
    }

    /// Check if a value is present
    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }

    /// Display label in the given render context
    pub fn label(&self, ctx: &dyn RenderContext) -> String {
        self.kind.label(ctx)
    }

    /// Text of the value; empty when unavailable
    pub fn render(&self, ctx: &dyn RenderContext) -> String {
        match self.value {
            None => String::new(),
            Some(v) if self.kind.is_integer() => format!("{}", v.round() as i64),
            Some(v) => format!("{:.*}", ctx.digits(), v),
        }
    }
}

impl fmt::Display for RegressionStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&AsciiRender))
    }
}

/// A statistic together with an optional caller-chosen label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledStatistic {
    /// The statistic
    pub statistic: RegressionStatistic,
    /// Label replacing the kind's own label
    pub label: Option<String>,
}

impl LabeledStatistic {
    /// Row label in the given render context
    pub fn label(&self, ctx: &dyn RenderContext) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.statistic.label(ctx),
        }
    }

    /// Text of the value; empty when unavailable
    pub fn render(&self, ctx: &dyn RenderContext) -> String {
        self.statistic.render(ctx)
    }
}

/// What a caller may ask for in the statistics section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatisticRequest {
    /// Extract this kind from the model
    Kind(StatisticKind),
    /// Use a precomputed statistic as is
    Value(RegressionStatistic),
    /// Any request shown under a custom label
    Labeled(Box<StatisticRequest>, String),
}

impl StatisticRequest {
    /// Show this request under a custom label
    pub fn labeled(self, label: impl Into<String>) -> Self {
        StatisticRequest::Labeled(Box::new(self), label.into())
    }

    /// Materialize the request against a model
    pub fn resolve<M: RegressionModel + ?Sized>(&self, model: &M) -> LabeledStatistic {
        match self {
            StatisticRequest::Kind(kind) => LabeledStatistic {
                statistic: RegressionStatistic::construct(*kind, model),
                label: None,
            },
            StatisticRequest::Value(statistic) => LabeledStatistic {
                statistic: *statistic,
                label: None,
            },
            StatisticRequest::Labeled(inner, label) => LabeledStatistic {
                label: Some(label.clone()),
                ..inner.resolve(model)
            },
        }
    }
}

impl From<StatisticKind> for StatisticRequest {
    fn from(kind: StatisticKind) -> Self {
        StatisticRequest::Kind(kind)
    }
}

impl From<RegressionStatistic> for StatisticRequest {
    fn from(statistic: RegressionStatistic) -> Self {
        StatisticRequest::Value(statistic)
    }
}

impl From<(StatisticKind, &str)> for StatisticRequest {
    fn from((kind, label): (StatisticKind, &str)) -> Self {
        StatisticRequest::Kind(kind).labeled(label)
    }
}

impl From<(StatisticKind, String)> for StatisticRequest {
    fn from((kind, label): (StatisticKind, String)) -> Self {
        StatisticRequest::Kind(kind).labeled(label)
    }
}

/// Statistics shown when the caller does not choose any
pub fn default_statistics(regression_type: &RegressionType) -> Vec<StatisticKind> {
    use StatisticKind::*;

    match regression_type {
        RegressionType::Family {
            instrumental: true, ..
        } => vec![Nobs, R2, FStatIv],
        RegressionType::Family {
            family: Family::Normal,
            ..
        } => vec![Nobs, R2],
        RegressionType::Family { .. } => vec![Nobs, PSEUDO_R2],
        RegressionType::NonLinear | RegressionType::Custom(_) => vec![Nobs],
    }
}
