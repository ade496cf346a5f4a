//! Core traits and types for summarizing regression models
//!
//! This module defines the capability contract a fitted model exposes and
//! the small value types the summary is assembled from.

use rt_core::{CoefficientName, Formula};

pub use auxiliary::{AuxEntry, AuxValue, FIXED_EFFECTS_KEY, OtherData};
pub use coefficient::{StandardizationData, UnderStatistic, UnderValue};
pub use regression_type::{Family, RegressionType};
pub use render::{AsciiRender, HtmlRender, LatexRender, RenderContext};
pub use statistics::{
    ADJ_PSEUDO_R2, LabeledStatistic, PSEUDO_R2, RegressionStatistic, StatisticKind,
    StatisticRequest, default_statistics,
};

pub use crate::error::{CapabilityError, CapabilityResult, ModelError};

pub mod auxiliary;
pub mod coefficient;
pub mod regression_type;
pub mod render;
pub mod statistics;

#[cfg(test)]
mod tests;

/// Result type for record construction
pub type Result<T> = std::result::Result<T, ModelError>;

/// Pseudo-R² definitions for models fitted by maximum likelihood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoR2 {
    /// 1 - ll / ll0
    McFadden,
    /// 1 - exp(2 (ll0 - ll) / n)
    CoxSnell,
    /// Cox-Snell rescaled to a maximum of one
    Nagelkerke,
    /// 1 - deviance / null deviance
    DevianceRatio,
}

/// Introspection contract of a fitted regression model
///
/// The first five methods are required; a failure there aborts the summary.
/// Everything else is optional and defaults to
/// [`CapabilityError::Unsupported`], or is derived from other optional
/// capabilities following the usual likelihood-based definitions.
pub trait RegressionModel {
    /// Estimated coefficients, in the order of [`RegressionModel::coefficient_names`]
    fn coefficients(&self) -> Result<Vec<f64>>;

    /// Standard errors of the coefficients
    fn standard_errors(&self) -> Result<Vec<f64>>;

    /// Residual degrees of freedom, passed through as reported
    fn residual_dof(&self) -> i64;

    /// Response and terms of the model
    fn formula_schema(&self) -> Result<Formula>;

    /// Whether the model is a linear model
    fn is_linear(&self) -> bool;

    /// Coefficient names; derived from the formula schema by default
    fn coefficient_names(&self) -> Result<Vec<CoefficientName>> {
        Ok(self.formula_schema()?.coef_names())
    }

    /// Number of observations
    fn nobs(&self) -> CapabilityResult<usize> {
        Err(CapabilityError::Unsupported("nobs"))
    }

    /// Model degrees of freedom, including any dispersion parameter
    fn dof(&self) -> CapabilityResult<usize> {
        Err(CapabilityError::Unsupported("dof"))
    }

    /// Coefficient of determination
    fn r2(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("r2"))
    }

    /// Adjusted coefficient of determination
    fn adj_r2(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("adj_r2"))
    }

    /// Log-likelihood of the fitted model
    fn log_likelihood(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("log_likelihood"))
    }

    /// Log-likelihood of the intercept-only model
    fn null_log_likelihood(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("null_log_likelihood"))
    }

    /// Deviance of the fitted model
    fn deviance(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("deviance"))
    }

    /// Deviance of the intercept-only model
    fn null_deviance(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("null_deviance"))
    }

    /// Pseudo-R²
    fn pseudo_r2(&self, kind: PseudoR2) -> CapabilityResult<f64> {
        const CAP: &str = "pseudo_r2";
        match kind {
            PseudoR2::McFadden => {
                let ll = requires(CAP, "log_likelihood", self.log_likelihood())?;
                let ll0 = requires(CAP, "null_log_likelihood", self.null_log_likelihood())?;
                Ok(1.0 - ll / ll0)
            }
            PseudoR2::CoxSnell => {
                let (ll, ll0, n) = likelihood_inputs(self, CAP)?;
                Ok(1.0 - (2.0 * (ll0 - ll) / n).exp())
            }
            PseudoR2::Nagelkerke => {
                let (ll, ll0, n) = likelihood_inputs(self, CAP)?;
                Ok((1.0 - (2.0 * (ll0 - ll) / n).exp()) / (1.0 - (2.0 * ll0 / n).exp()))
            }
            PseudoR2::DevianceRatio => {
                let dev = requires(CAP, "deviance", self.deviance())?;
                let dev0 = requires(CAP, "null_deviance", self.null_deviance())?;
                Ok(1.0 - dev / dev0)
            }
        }
    }

    /// Adjusted pseudo-R², defined for McFadden and the deviance ratio only
    fn adj_pseudo_r2(&self, kind: PseudoR2) -> CapabilityResult<f64> {
        const CAP: &str = "adj_pseudo_r2";
        let k = requires(CAP, "dof", self.dof())? as f64;
        match kind {
            PseudoR2::McFadden => {
                let ll = requires(CAP, "log_likelihood", self.log_likelihood())?;
                let ll0 = requires(CAP, "null_log_likelihood", self.null_log_likelihood())?;
                Ok(1.0 - (ll - k) / ll0)
            }
            PseudoR2::DevianceRatio => {
                let n = requires(CAP, "nobs", self.nobs())? as f64;
                let dev = requires(CAP, "deviance", self.deviance())?;
                let dev0 = requires(CAP, "null_deviance", self.null_deviance())?;
                Ok(1.0 - (dev * (n - 1.0)) / (dev0 * (n - k)))
            }
            PseudoR2::CoxSnell | PseudoR2::Nagelkerke => Err(CapabilityError::Unsupported(CAP)),
        }
    }

    /// Akaike information criterion
    fn aic(&self) -> CapabilityResult<f64> {
        let ll = requires("aic", "log_likelihood", self.log_likelihood())?;
        let k = requires("aic", "dof", self.dof())? as f64;
        Ok(-2.0 * ll + 2.0 * k)
    }

    /// Corrected Akaike information criterion
    fn aicc(&self) -> CapabilityResult<f64> {
        let aic = self.aic()?;
        let k = requires("aicc", "dof", self.dof())? as f64;
        let n = requires("aicc", "nobs", self.nobs())? as f64;
        Ok(aic + 2.0 * k * (k + 1.0) / (n - k - 1.0))
    }

    /// Bayesian information criterion
    fn bic(&self) -> CapabilityResult<f64> {
        let ll = requires("bic", "log_likelihood", self.log_likelihood())?;
        let k = requires("bic", "dof", self.dof())? as f64;
        let n = requires("bic", "nobs", self.nobs())? as f64;
        Ok(-2.0 * ll + k * n.ln())
    }

    /// Model F-statistic
    fn f_statistic(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("f_statistic"))
    }

    /// p-value of the model F-statistic
    fn f_pvalue(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("f_pvalue"))
    }

    /// First-stage F-statistic of an instrumented model
    fn f_statistic_iv(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("f_statistic_iv"))
    }

    /// p-value of the first-stage F-statistic
    fn f_pvalue_iv(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("f_pvalue_iv"))
    }

    /// R² of the within (demeaned) regression
    fn r2_within(&self) -> CapabilityResult<f64> {
        Err(CapabilityError::Unsupported("r2_within"))
    }

    /// Data needed to express coefficients in standard-deviation units
    fn standardization_data(&self) -> CapabilityResult<StandardizationData> {
        Err(CapabilityError::Unsupported("standardization"))
    }

    /// Absorbed fixed effects; the `fe(...)` terms of the schema by default
    fn fixed_effects(&self) -> Vec<CoefficientName> {
        self.formula_schema()
            .map(|formula| formula.fixed_effect_names())
            .unwrap_or_default()
    }

    /// Extra named data passed through to the renderer (clusters, random effects, ...)
    fn other_data(&self) -> OtherData {
        OtherData::new()
    }

    /// Estimator classification; `None` lets the summary decide from [`RegressionModel::is_linear`]
    fn regression_type(&self) -> Option<RegressionType> {
        None
    }
}

/// Re-label an unavailable input as a missing dependency of `capability`
fn requires<T>(
    capability: &'static str,
    input: &'static str,
    value: CapabilityResult<T>,
) -> CapabilityResult<T> {
    value.map_err(|err| match err {
        CapabilityError::Unsupported(_) => CapabilityError::MissingInput {
            capability,
            requires: input,
        },
        other => other,
    })
}

fn likelihood_inputs<M: RegressionModel + ?Sized>(
    model: &M,
    capability: &'static str,
) -> CapabilityResult<(f64, f64, f64)> {
    let ll = requires(capability, "log_likelihood", model.log_likelihood())?;
    let ll0 = requires(capability, "null_log_likelihood", model.null_log_likelihood())?;
    let n = requires(capability, "nobs", model.nobs())? as f64;
    Ok((ll, ll0, n))
}
