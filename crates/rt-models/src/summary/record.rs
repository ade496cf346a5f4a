//! The unified regression record handed to table renderers

use serde::Serialize;

use rt_core::{CoefficientName, FormulaError, NameInput, NameLabels};

use super::options::SummaryOptions;
use crate::base::coefficient::{p_values, standardize};
use crate::base::{
    AuxEntry, FIXED_EFFECTS_KEY, LabeledStatistic, ModelError, OtherData, RegressionModel,
    RegressionType, Result, StatisticKind, StatisticRequest, UnderStatistic, UnderValue,
    default_statistics,
};

/// Canonical inputs of a [`SimpleRegressionResult`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordParts {
    /// Response name
    pub response_name: CoefficientName,
    /// Coefficient names
    pub coef_names: Vec<CoefficientName>,
    /// Coefficient estimates
    pub coef_values: Vec<f64>,
    /// Standard errors
    pub coef_std_errors: Vec<f64>,
    /// p-values
    pub coef_pvalues: Vec<f64>,
    /// Materialized statistics
    pub statistics: Vec<LabeledStatistic>,
    /// Regression type tag
    pub regression_type: RegressionType,
    /// Residual degrees of freedom as reported by the model
    pub residual_dof: i64,
    /// Auxiliary data
    pub other_data: OtherData,
}

/// Model-independent inputs to [`SimpleRegressionResult::build`]
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInputs {
    /// Coefficient estimates
    pub coef_values: Vec<f64>,
    /// Standard errors
    pub coef_std_errors: Vec<f64>,
    /// p-values
    pub coef_pvalues: Vec<f64>,
    /// Statistics to materialize against the model
    pub statistics: Vec<StatisticRequest>,
    /// Regression type; `None` asks the model
    pub regression_type: Option<RegressionType>,
    /// Absorbed fixed effects
    pub fixed_effects: Vec<CoefficientName>,
    /// Residual degrees of freedom
    pub residual_dof: i64,
    /// Auxiliary data
    pub other_data: OtherData,
    /// Response name; `None` takes the first response of the formula
    pub response_name: Option<NameInput>,
    /// Coefficient names; `None` asks the model
    pub coef_names: Option<Vec<CoefficientName>>,
}

impl BuildInputs {
    /// Inputs with the coefficient table filled in and everything else empty
    pub fn new(
        coef_values: Vec<f64>,
        coef_std_errors: Vec<f64>,
        coef_pvalues: Vec<f64>,
        residual_dof: i64,
    ) -> Self {
        Self {
            coef_values,
            coef_std_errors,
            coef_pvalues,
            statistics: Vec::new(),
            regression_type: None,
            fixed_effects: Vec::new(),
            residual_dof,
            other_data: OtherData::new(),
            response_name: None,
            coef_names: None,
        }
    }

    /// Set the requested statistics
    pub fn with_statistics<I, S>(mut self, statistics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StatisticRequest>,
    {
        self.statistics = statistics.into_iter().map(Into::into).collect();
        self
    }

    /// Set the regression type
    pub fn with_regression_type(mut self, regression_type: RegressionType) -> Self {
        self.regression_type = Some(regression_type);
        self
    }

    /// Set the absorbed fixed effects
    pub fn with_fixed_effects(mut self, fixed_effects: Vec<CoefficientName>) -> Self {
        self.fixed_effects = fixed_effects;
        self
    }

    /// Set the auxiliary data
    pub fn with_other_data(mut self, other_data: OtherData) -> Self {
        self.other_data = other_data;
        self
    }

    /// Override the response name; with several names the first one is used
    pub fn with_response_name(mut self, name: impl Into<NameInput>) -> Self {
        self.response_name = Some(name.into());
        self
    }

    /// Override the coefficient names
    pub fn with_coef_names<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<CoefficientName>,
    {
        self.coef_names = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Borrowed view of one field of a [`SimpleRegressionResult`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    /// A single name
    Name(&'a CoefficientName),
    /// A list of names
    Names(&'a [CoefficientName]),
    /// Coefficient-aligned numbers
    Values(&'a [f64]),
    /// Summary statistics
    Statistics(&'a [LabeledStatistic]),
    /// Regression type
    RegressionType(&'a RegressionType),
    /// Integer field
    Integer(i64),
    /// Entries of the auxiliary bag
    Auxiliary(&'a [AuxEntry]),
}

/// Unified summary of one fitted regression model
///
/// Built once and never modified; renderers read it through the accessors or
/// by name with [`SimpleRegressionResult::get`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleRegressionResult {
    response_name: CoefficientName,
    coef_names: Vec<CoefficientName>,
    coef_values: Vec<f64>,
    coef_std_errors: Vec<f64>,
    coef_pvalues: Vec<f64>,
    statistics: Vec<LabeledStatistic>,
    regression_type: RegressionType,
    residual_dof: i64,
    other_data: OtherData,
}

impl SimpleRegressionResult {
    /// Canonical constructor: every other way of building a record ends here.
    ///
    /// Checks that names, values, errors and p-values line up, then applies
    /// `labels` to the response, coefficient and auxiliary names.
    pub fn new(parts: RecordParts, labels: &NameLabels) -> Result<Self> {
        let n = parts.coef_names.len();
        for (what, len) in [
            ("coef_values", parts.coef_values.len()),
            ("coef_std_errors", parts.coef_std_errors.len()),
            ("coef_pvalues", parts.coef_pvalues.len()),
        ] {
            if len != n {
                return Err(ModelError::dimension(what, n, len));
            }
        }

        let other_data = parts
            .other_data
            .into_iter()
            .map(|(key, entries)| {
                let entries = entries
                    .into_iter()
                    .map(|entry| AuxEntry {
                        label: labels.rename(&entry.label),
                        ..entry
                    })
                    .collect();
                (key, entries)
            })
            .collect();

        Ok(Self {
            response_name: labels.rename(&parts.response_name),
            coef_names: labels.rename_all(&parts.coef_names),
            coef_values: parts.coef_values,
            coef_std_errors: parts.coef_std_errors,
            coef_pvalues: parts.coef_pvalues,
            statistics: parts.statistics,
            regression_type: parts.regression_type,
            residual_dof: parts.residual_dof,
            other_data,
        })
    }

    /// Assemble a record from precomputed coefficient statistics.
    ///
    /// Names missing from `inputs` come from the model's formula schema,
    /// statistic requests are materialized against the model, and the
    /// regression type falls back to the model's own classification.
    pub fn build<M: RegressionModel + ?Sized>(
        model: &M,
        inputs: BuildInputs,
        labels: &NameLabels,
    ) -> Result<Self> {
        let response_name = match inputs.response_name {
            Some(name) => name.into_first(),
            None => NameInput::from(model.formula_schema()?.response).into_first(),
        }
        .ok_or(FormulaError::MissingResponse)?;

        let coef_names = match inputs.coef_names {
            Some(names) => names,
            None => model.coefficient_names()?,
        };

        let statistics = inputs
            .statistics
            .iter()
            .map(|request| request.resolve(model))
            .collect();

        let regression_type = inputs
            .regression_type
            .or_else(|| model.regression_type())
            .unwrap_or_else(|| RegressionType::from_linearity(model.is_linear()));

        let other_data = merge_fixed_effects(inputs.fixed_effects, inputs.other_data);

        Self::new(
            RecordParts {
                response_name,
                coef_names,
                coef_values: inputs.coef_values,
                coef_std_errors: inputs.coef_std_errors,
                coef_pvalues: inputs.coef_pvalues,
                statistics,
                regression_type,
                residual_dof: inputs.residual_dof,
                other_data,
            },
            labels,
        )
    }

    /// Summarize a fitted model.
    ///
    /// Computes p-values from the model's coefficients and standard errors,
    /// optionally standardizes them, and extracts the requested (or default)
    /// statistics.
    pub fn from_model<M: RegressionModel + ?Sized>(
        model: &M,
        options: &SummaryOptions,
    ) -> Result<Self> {
        let coef_values = model.coefficients()?;
        let coef_std_errors = model.standard_errors()?;
        let residual_dof = model.residual_dof();

        let coef_pvalues = p_values(&coef_values, &coef_std_errors, residual_dof)?;
        let (coef_values, coef_std_errors) = if options.standardize {
            standardize(model, coef_values, coef_std_errors)
        } else {
            (coef_values, coef_std_errors)
        };

        let regression_type = model
            .regression_type()
            .unwrap_or_else(|| RegressionType::from_linearity(model.is_linear()));

        let statistics = match &options.statistics {
            Some(requests) => requests.clone(),
            None => default_statistics(&regression_type)
                .into_iter()
                .map(StatisticRequest::from)
                .collect(),
        };

        let inputs = BuildInputs::new(coef_values, coef_std_errors, coef_pvalues, residual_dof)
            .with_statistics(statistics)
            .with_regression_type(regression_type)
            .with_fixed_effects(model.fixed_effects())
            .with_other_data(model.other_data());

        Self::build(model, inputs, &options.labels)
    }

    /// Response name
    pub fn response_name(&self) -> &CoefficientName {
        &self.response_name
    }

    /// Coefficient names
    pub fn coef_names(&self) -> &[CoefficientName] {
        &self.coef_names
    }

    /// Coefficient estimates
    pub fn coef_values(&self) -> &[f64] {
        &self.coef_values
    }

    /// Standard errors
    pub fn coef_std_errors(&self) -> &[f64] {
        &self.coef_std_errors
    }

    /// p-values
    pub fn coef_pvalues(&self) -> &[f64] {
        &self.coef_pvalues
    }

    /// Summary statistics, in requested order
    pub fn statistics(&self) -> &[LabeledStatistic] {
        &self.statistics
    }

    /// Regression type tag
    pub fn regression_type(&self) -> &RegressionType {
        &self.regression_type
    }

    /// Residual degrees of freedom
    pub fn residual_dof(&self) -> i64 {
        self.residual_dof
    }

    /// Auxiliary data
    pub fn other_data(&self) -> &OtherData {
        &self.other_data
    }

    /// Number of coefficients
    pub fn len(&self) -> usize {
        self.coef_names.len()
    }

    /// Check if the record has no coefficients
    pub fn is_empty(&self) -> bool {
        self.coef_names.is_empty()
    }

    /// Look up a field by name.
    ///
    /// Structured fields are tried first; any other key is looked up in the
    /// auxiliary data. Unknown keys give `None`.
    pub fn get(&self, key: &str) -> Option<Field<'_>> {
        match key {
            "response_name" => Some(Field::Name(&self.response_name)),
            "coef_names" => Some(Field::Names(&self.coef_names)),
            "coef_values" => Some(Field::Values(&self.coef_values)),
            "coef_std_errors" => Some(Field::Values(&self.coef_std_errors)),
            "coef_pvalues" => Some(Field::Values(&self.coef_pvalues)),
            "statistics" => Some(Field::Statistics(&self.statistics)),
            "regression_type" => Some(Field::RegressionType(&self.regression_type)),
            "residual_dof" => Some(Field::Integer(self.residual_dof)),
            _ => self.aux(key).map(Field::Auxiliary),
        }
    }

    /// Entries of the auxiliary bag under `key`
    pub fn aux(&self, key: &str) -> Option<&[AuxEntry]> {
        self.other_data.get(key).map(Vec::as_slice)
    }

    /// Absorbed fixed effects, empty when there are none
    pub fn fixed_effects(&self) -> &[AuxEntry] {
        self.aux(FIXED_EFFECTS_KEY).unwrap_or(&[])
    }

    /// First statistic of the given kind
    pub fn statistic(&self, kind: StatisticKind) -> Option<&LabeledStatistic> {
        self.statistics.iter().find(|s| s.statistic.kind == kind)
    }

    /// Values printed beneath each coefficient
    pub fn under_statistics(&self, under: UnderStatistic) -> Result<Vec<UnderValue>> {
        under.compute(&self.coef_values, &self.coef_std_errors, self.residual_dof)
    }
}

/// Put fixed effects first in the auxiliary bag, after any the caller already listed
fn merge_fixed_effects(fixed_effects: Vec<CoefficientName>, mut other_data: OtherData) -> OtherData {
    if fixed_effects.is_empty() {
        return other_data;
    }

    let mut entries = other_data.shift_remove(FIXED_EFFECTS_KEY).unwrap_or_default();
    entries.extend(fixed_effects.into_iter().map(AuxEntry::included));

    let mut merged = OtherData::with_capacity(other_data.len() + 1);
    merged.insert(FIXED_EFFECTS_KEY.to_string(), entries);
    merged.extend(other_data);
    merged
}
