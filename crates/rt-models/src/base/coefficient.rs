//! Coefficient normalization: p-values, standardization and the statistic
//! printed beneath each coefficient

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

use super::{RegressionModel, Result};
use crate::error::{CapabilityError, CapabilityResult, ModelError};

/// Ratio of each coefficient to its standard error
pub fn t_statistics(values: &[f64], std_errors: &[f64]) -> Result<Vec<f64>> {
    check_len("std_errors", values.len(), std_errors.len())?;
    Ok(values
        .iter()
        .zip(std_errors)
        .map(|(&b, &se)| b / se)
        .collect())
}

/// Two-sided p-values of the coefficients.
///
/// p = P(F(1, df) > (b / se)²), the squared t-test. The same reference
/// distribution is used for every model family; for nonlinear families this
/// is an approximation.
///
/// A missing (NaN) coefficient or standard error gives NaN. Otherwise a zero
/// standard error saturates the p-value to 0. A non-positive residual df uses
/// the large-sample limit χ²(1).
pub fn p_values(values: &[f64], std_errors: &[f64], residual_dof: i64) -> Result<Vec<f64>> {
    let t = t_statistics(values, std_errors)?;

    let upper_tail: Box<dyn Fn(f64) -> f64> = if residual_dof > 0 {
        let dist = FisherSnedecor::new(1.0, residual_dof as f64)
            .map_err(|e| numerical_error("F(1, df) reference distribution", e))?;
        Box::new(move |x| dist.sf(x))
    } else {
        log::warn!(
            "residual degrees of freedom is {}; using chi-squared(1) for p-values",
            residual_dof
        );
        let dist = ChiSquared::new(1.0)
            .map_err(|e| numerical_error("chi-squared(1) reference distribution", e))?;
        Box::new(move |x| dist.sf(x))
    };

    Ok(t
        .iter()
        .zip(values.iter().zip(std_errors))
        .map(|(&t, (&b, &se))| {
            if b.is_nan() || se.is_nan() {
                f64::NAN
            } else if se == 0.0 || t.is_infinite() {
                0.0
            } else if t.is_nan() {
                f64::NAN
            } else {
                upper_tail(t * t).clamp(0.0, 1.0)
            }
        })
        .collect())
}

/// Response and model matrix of a fitted model, used to standardize coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizationData {
    /// Response vector
    pub response: Array1<f64>,
    /// Model matrix, one column per coefficient
    pub model_matrix: Array2<f64>,
}

impl StandardizationData {
    /// Create standardization data
    pub fn new(response: Array1<f64>, model_matrix: Array2<f64>) -> Self {
        Self {
            response,
            model_matrix,
        }
    }

    /// Sample standard deviations of the response and of every regressor
    pub fn standard_deviations(&self) -> CapabilityResult<(f64, Vec<f64>)> {
        const CAP: &str = "standardization";

        let n = self.response.len();
        if n < 2 || self.model_matrix.nrows() != n {
            return Err(CapabilityError::numerical(
                CAP,
                format!(
                    "need at least two observations with matching rows, got response {} and model matrix {}",
                    n,
                    self.model_matrix.nrows()
                ),
            ));
        }

        let sd_y = self.response.std(1.0);
        if !(sd_y.is_finite() && sd_y > 0.0) {
            return Err(CapabilityError::numerical(
                CAP,
                format!("response standard deviation is {}", sd_y),
            ));
        }

        let sd_x = self.model_matrix.std_axis(Axis(0), 1.0).to_vec();
        Ok((sd_y, sd_x))
    }
}

/// Express one value in standard-deviation units.
///
/// A constant regressor (sd 0, e.g. the intercept) is scaled by 1 so the value
/// is reported in units of the response's standard deviation.
pub fn rescale(sd_x: f64, sd_y: f64, value: f64) -> f64 {
    if sd_x == 0.0 {
        value / sd_y
    } else {
        value * sd_x / sd_y
    }
}

/// Standardize coefficients and standard errors from known standard deviations
pub fn standardize_with(
    values: &[f64],
    std_errors: &[f64],
    sd_x: &[f64],
    sd_y: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
    check_len("std_errors", values.len(), std_errors.len())?;
    check_len("regressor standard deviations", values.len(), sd_x.len())?;

    let scaled = |xs: &[f64]| -> Vec<f64> {
        xs.iter()
            .zip(sd_x)
            .map(|(&v, &sd)| rescale(sd, sd_y, v))
            .collect()
    };
    Ok((scaled(values), scaled(std_errors)))
}

/// Standardize using the model's own data.
///
/// Models that cannot provide standardization data keep their raw values; a
/// warning is logged instead of failing the summary.
pub fn standardize<M: RegressionModel + ?Sized>(
    model: &M,
    values: Vec<f64>,
    std_errors: Vec<f64>,
) -> (Vec<f64>, Vec<f64>) {
    let scaled = model
        .standardization_data()
        .and_then(|data| data.standard_deviations())
        .map_err(|err| err.to_string())
        .and_then(|(sd_y, sd_x)| {
            standardize_with(&values, &std_errors, &sd_x, sd_y).map_err(|err| err.to_string())
        });

    match scaled {
        Ok(scaled) => scaled,
        Err(reason) => {
            log::warn!(
                "standardized coefficients are not available ({}); reporting raw coefficients",
                reason
            );
            (values, std_errors)
        }
    }
}

/// Statistic printed beneath each coefficient
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum UnderStatistic {
    /// The standard error itself
    #[default]
    StdError,
    /// coefficient / standard error
    TStat,
    /// Confidence interval at the given level, e.g. 0.95
    ConfInt(f64),
}

/// Value of an [`UnderStatistic`] for one coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UnderValue {
    /// Single number
    Value(f64),
    /// Lower and upper bound
    Interval(f64, f64),
}

impl UnderValue {
    /// Text shown in the table, in parentheses
    pub fn render(&self, digits: usize) -> String {
        match self {
            UnderValue::Value(v) => format!("({:.*})", digits, v),
            UnderValue::Interval(lo, hi) => format!("({:.*}, {:.*})", digits, lo, digits, hi),
        }
    }
}

impl UnderStatistic {
    /// Compute the statistic for every coefficient
    pub fn compute(
        self,
        values: &[f64],
        std_errors: &[f64],
        residual_dof: i64,
    ) -> Result<Vec<UnderValue>> {
        check_len("std_errors", values.len(), std_errors.len())?;

        match self {
            UnderStatistic::StdError => {
                Ok(std_errors.iter().map(|&se| UnderValue::Value(se)).collect())
            }
            UnderStatistic::TStat => Ok(t_statistics(values, std_errors)?
                .into_iter()
                .map(UnderValue::Value)
                .collect()),
            UnderStatistic::ConfInt(level) => {
                let critical = critical_value(level, residual_dof)?;
                Ok(values
                    .iter()
                    .zip(std_errors)
                    .map(|(&b, &se)| UnderValue::Interval(b - critical * se, b + critical * se))
                    .collect())
            }
        }
    }
}

/// Two-sided critical value of Student's t (normal when df is not positive)
fn critical_value(level: f64, residual_dof: i64) -> Result<f64> {
    if !(level > 0.0 && level < 1.0) {
        return Err(ModelError::InvalidConfig {
            message: format!("confidence level must be in (0, 1), got {}", level),
        });
    }

    const OPERATION: &str = "confidence interval critical value";
    let q = 1.0 - (1.0 - level) / 2.0;

    if residual_dof > 0 {
        let dist = StudentsT::new(0.0, 1.0, residual_dof as f64)
            .map_err(|e| numerical_error(OPERATION, e))?;
        Ok(dist.inverse_cdf(q))
    } else {
        let dist = Normal::new(0.0, 1.0).map_err(|e| numerical_error(OPERATION, e))?;
        Ok(dist.inverse_cdf(q))
    }
}

fn numerical_error(operation: &str, err: impl std::fmt::Display) -> ModelError {
    ModelError::NumericalError {
        message: err.to_string(),
        operation: operation.to_string(),
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ModelError::dimension(what, expected, actual))
    }
}
