//! An owned, fully specified fitted model
//!
//! [`ModelSnapshot`] holds the outputs of an estimation done elsewhere and
//! answers the [`RegressionModel`] contract from them. Capabilities that were
//! never set behave exactly like an unsupported capability.

use serde::{Deserialize, Serialize};

use rt_core::{CoefficientName, Formula};

use crate::base::{
    CapabilityError, CapabilityResult, ModelError, OtherData, RegressionModel, RegressionType,
    Result, StandardizationData,
};

/// Optional scalar capabilities of a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStatistics {
    /// Number of observations
    pub nobs: Option<usize>,
    /// Model degrees of freedom
    pub dof: Option<usize>,
    /// R²
    pub r2: Option<f64>,
    /// Adjusted R²
    pub adj_r2: Option<f64>,
    /// Log-likelihood of the fitted model
    pub log_likelihood: Option<f64>,
    /// Log-likelihood of the intercept-only model
    pub null_log_likelihood: Option<f64>,
    /// Deviance of the fitted model
    pub deviance: Option<f64>,
    /// Deviance of the intercept-only model
    pub null_deviance: Option<f64>,
    /// Model F-statistic
    pub f_statistic: Option<f64>,
    /// p-value of the model F-statistic
    pub f_pvalue: Option<f64>,
    /// First-stage F-statistic
    pub f_statistic_iv: Option<f64>,
    /// p-value of the first-stage F-statistic
    pub f_pvalue_iv: Option<f64>,
    /// Within R²
    pub r2_within: Option<f64>,
}

/// Fitted model described by its estimates
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSnapshot {
    formula: Formula,
    coefficients: Vec<f64>,
    standard_errors: Vec<f64>,
    residual_dof: i64,
    is_linear: bool,
    coef_names: Option<Vec<CoefficientName>>,
    statistics: SnapshotStatistics,
    standardization: Option<StandardizationData>,
    regression_type: Option<RegressionType>,
    fixed_effects: Option<Vec<CoefficientName>>,
    other_data: OtherData,
}

impl ModelSnapshot {
    /// Linear model with the required capabilities filled in
    pub fn new(
        formula: Formula,
        coefficients: Vec<f64>,
        standard_errors: Vec<f64>,
        residual_dof: i64,
    ) -> Self {
        Self {
            formula,
            coefficients,
            standard_errors,
            residual_dof,
            is_linear: true,
            coef_names: None,
            statistics: SnapshotStatistics::default(),
            standardization: None,
            regression_type: None,
            fixed_effects: None,
            other_data: OtherData::new(),
        }
    }

    /// Parse `formula` and build a snapshot from it
    pub fn parse(
        formula: &str,
        coefficients: Vec<f64>,
        standard_errors: Vec<f64>,
        residual_dof: i64,
    ) -> Result<Self> {
        Ok(Self::new(
            Formula::parse(formula)?,
            coefficients,
            standard_errors,
            residual_dof,
        ))
    }

    /// Mark the model as nonlinear
    pub fn nonlinear(mut self) -> Self {
        self.is_linear = false;
        self
    }

    /// Override the coefficient names derived from the formula
    pub fn with_coef_names<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<CoefficientName>,
    {
        self.coef_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Replace all optional statistics at once
    pub fn with_statistics(mut self, statistics: SnapshotStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    /// Set the number of observations
    pub fn with_nobs(mut self, nobs: usize) -> Self {
        self.statistics.nobs = Some(nobs);
        self
    }

    /// Set the model degrees of freedom
    pub fn with_dof(mut self, dof: usize) -> Self {
        self.statistics.dof = Some(dof);
        self
    }

    /// Set R²
    pub fn with_r2(mut self, r2: f64) -> Self {
        self.statistics.r2 = Some(r2);
        self
    }

    /// Set adjusted R²
    pub fn with_adj_r2(mut self, adj_r2: f64) -> Self {
        self.statistics.adj_r2 = Some(adj_r2);
        self
    }

    /// Set the fitted and null log-likelihoods
    pub fn with_log_likelihood(mut self, ll: f64, null_ll: f64) -> Self {
        self.statistics.log_likelihood = Some(ll);
        self.statistics.null_log_likelihood = Some(null_ll);
        self
    }

    /// Set the fitted and null deviances
    pub fn with_deviance(mut self, deviance: f64, null_deviance: f64) -> Self {
        self.statistics.deviance = Some(deviance);
        self.statistics.null_deviance = Some(null_deviance);
        self
    }

    /// Set the model F-test
    pub fn with_f_test(mut self, statistic: f64, pvalue: f64) -> Self {
        self.statistics.f_statistic = Some(statistic);
        self.statistics.f_pvalue = Some(pvalue);
        self
    }

    /// Set the first-stage F-test of an instrumented model
    pub fn with_first_stage(mut self, statistic: f64, pvalue: f64) -> Self {
        self.statistics.f_statistic_iv = Some(statistic);
        self.statistics.f_pvalue_iv = Some(pvalue);
        self
    }

    /// Set the within R²
    pub fn with_r2_within(mut self, r2_within: f64) -> Self {
        self.statistics.r2_within = Some(r2_within);
        self
    }

    /// Provide the response and model matrix for standardization
    pub fn with_standardization(mut self, data: StandardizationData) -> Self {
        self.standardization = Some(data);
        self
    }

    /// Set the regression type instead of deriving it from linearity
    pub fn with_regression_type(mut self, regression_type: RegressionType) -> Self {
        self.regression_type = Some(regression_type);
        self
    }

    /// Override the fixed effects found in the formula
    pub fn with_fixed_effects<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<CoefficientName>,
    {
        self.fixed_effects = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the auxiliary data passed through to the record
    pub fn with_other_data(mut self, other_data: OtherData) -> Self {
        self.other_data = other_data;
        self
    }

    /// The formula schema
    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

fn provided<T: Copy>(value: Option<T>, capability: &'static str) -> CapabilityResult<T> {
    value.ok_or(CapabilityError::Unsupported(capability))
}

impl RegressionModel for ModelSnapshot {
    fn coefficients(&self) -> Result<Vec<f64>> {
        Ok(self.coefficients.clone())
    }

    fn standard_errors(&self) -> Result<Vec<f64>> {
        if self.standard_errors.len() != self.coefficients.len() {
            return Err(ModelError::dimension(
                "standard_errors",
                self.coefficients.len(),
                self.standard_errors.len(),
            ));
        }
        Ok(self.standard_errors.clone())
    }

    fn residual_dof(&self) -> i64 {
        self.residual_dof
    }

    fn formula_schema(&self) -> Result<Formula> {
        Ok(self.formula.clone())
    }

    fn is_linear(&self) -> bool {
        self.is_linear
    }

    fn coefficient_names(&self) -> Result<Vec<CoefficientName>> {
        match &self.coef_names {
            Some(names) => Ok(names.clone()),
            None => Ok(self.formula.coef_names()),
        }
    }

    fn nobs(&self) -> CapabilityResult<usize> {
        provided(self.statistics.nobs, "nobs")
    }

    fn dof(&self) -> CapabilityResult<usize> {
        provided(self.statistics.dof, "dof")
    }

    fn r2(&self) -> CapabilityResult<f64> {
        provided(self.statistics.r2, "r2")
    }

    fn adj_r2(&self) -> CapabilityResult<f64> {
        provided(self.statistics.adj_r2, "adj_r2")
    }

    fn log_likelihood(&self) -> CapabilityResult<f64> {
        provided(self.statistics.log_likelihood, "log_likelihood")
    }

    fn null_log_likelihood(&self) -> CapabilityResult<f64> {
        provided(self.statistics.null_log_likelihood, "null_log_likelihood")
    }

    fn deviance(&self) -> CapabilityResult<f64> {
        provided(self.statistics.deviance, "deviance")
    }

    fn null_deviance(&self) -> CapabilityResult<f64> {
        provided(self.statistics.null_deviance, "null_deviance")
    }

    fn f_statistic(&self) -> CapabilityResult<f64> {
        provided(self.statistics.f_statistic, "f_statistic")
    }

    fn f_pvalue(&self) -> CapabilityResult<f64> {
        provided(self.statistics.f_pvalue, "f_pvalue")
    }

    fn f_statistic_iv(&self) -> CapabilityResult<f64> {
        provided(self.statistics.f_statistic_iv, "f_statistic_iv")
    }

    fn f_pvalue_iv(&self) -> CapabilityResult<f64> {
        provided(self.statistics.f_pvalue_iv, "f_pvalue_iv")
    }

    fn r2_within(&self) -> CapabilityResult<f64> {
        provided(self.statistics.r2_within, "r2_within")
    }

    fn standardization_data(&self) -> CapabilityResult<StandardizationData> {
        self.standardization
            .clone()
            .ok_or(CapabilityError::Unsupported("standardization"))
    }

    fn fixed_effects(&self) -> Vec<CoefficientName> {
        match &self.fixed_effects {
            Some(names) => names.clone(),
            None => self.formula.fixed_effect_names(),
        }
    }

    fn other_data(&self) -> OtherData {
        self.other_data.clone()
    }

    fn regression_type(&self) -> Option<RegressionType> {
        self.regression_type.clone()
    }
}
