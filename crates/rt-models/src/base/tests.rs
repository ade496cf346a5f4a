//! Tests for the statistic registry and coefficient normalization

use approx::assert_abs_diff_eq;
use ndarray::array;
use proptest::prelude::*;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, Normal, StudentsT};

use rt_core::Formula;

use super::coefficient::{p_values, rescale, standardize, standardize_with, t_statistics};
use super::*;
use crate::snapshot::ModelSnapshot;

// ==================== Test Fixtures ====================

/// Model exposing only the required capabilities
struct BareModel;

impl RegressionModel for BareModel {
    fn coefficients(&self) -> Result<Vec<f64>> {
        Ok(vec![1.0, 2.0])
    }

    fn standard_errors(&self) -> Result<Vec<f64>> {
        Ok(vec![0.5, 0.5])
    }

    fn residual_dof(&self) -> i64 {
        10
    }

    fn formula_schema(&self) -> Result<Formula> {
        Ok(Formula::parse("y ~ x")?)
    }

    fn is_linear(&self) -> bool {
        true
    }
}

/// Maximum-likelihood fit with ll = -50, ll0 = -100, n = 200, k = 3
fn likelihood_model() -> ModelSnapshot {
    ModelSnapshot::parse("y ~ x1 + x2", vec![0.1, 0.2, 0.3], vec![0.1, 0.1, 0.1], 197)
        .unwrap()
        .with_nobs(200)
        .with_dof(3)
        .with_log_likelihood(-50.0, -100.0)
        .with_deviance(40.0, 100.0)
}

/// Render context renaming R²
struct RsqRender;

impl RenderContext for RsqRender {
    fn label_override(&self, kind: StatisticKind) -> Option<String> {
        (kind == StatisticKind::R2).then(|| "Rsq".to_string())
    }
}

// ==================== p-values ====================

#[test]
fn test_p_values_match_f_distribution() {
    assert_eq!(t_statistics(&[2.0, 0.5], &[1.0, 0.25]).unwrap(), vec![2.0, 2.0]);

    let p = p_values(&[2.0, 0.5], &[1.0, 0.25], 10).unwrap();
    let expected = FisherSnedecor::new(1.0, 10.0).unwrap().sf(4.0);

    assert_abs_diff_eq!(p[0], p[1], epsilon = 1e-12);
    assert_abs_diff_eq!(p[0], expected, epsilon = 1e-12);
    assert!(p[0] > 0.0 && p[0] < 1.0);
}

#[test]
fn test_p_values_equal_two_sided_t_test() {
    let p = p_values(&[2.0], &[1.0], 10).unwrap();
    let t = StudentsT::new(0.0, 1.0, 10.0).unwrap();

    assert_abs_diff_eq!(p[0], 2.0 * t.sf(2.0), epsilon = 1e-10);
    assert_abs_diff_eq!(p[0], 0.0734, epsilon = 1e-3);
}

#[test]
fn test_p_values_zero_standard_error() {
    let p = p_values(&[1.5, 0.0], &[0.0, 1.0], 20).unwrap();
    assert_eq!(p[0], 0.0);
    assert_abs_diff_eq!(p[1], 1.0, epsilon = 1e-12);
}

#[test]
fn test_p_values_nan_input() {
    let p = p_values(&[f64::NAN], &[1.0], 20).unwrap();
    assert!(p[0].is_nan());

    // a missing coefficient stays missing even with a zero standard error
    let p = p_values(&[f64::NAN, 1.0, 0.0], &[0.0, f64::NAN, 0.0], 10).unwrap();
    assert!(p[0].is_nan());
    assert!(p[1].is_nan());
    assert_eq!(p[2], 0.0);
}

#[test]
fn test_p_values_without_residual_dof_use_normal_limit() {
    let normal = Normal::new(0.0, 1.0).unwrap();
    for dof in [0, -3] {
        let p = p_values(&[2.0], &[1.0], dof).unwrap();
        assert_abs_diff_eq!(p[0], 2.0 * normal.sf(2.0), epsilon = 1e-10);
    }
}

#[test]
fn test_p_values_length_mismatch() {
    let result = p_values(&[1.0, 2.0], &[1.0], 10);
    assert!(matches!(
        result,
        Err(ModelError::DimensionMismatch {
            expected: 2,
            actual: 1,
            ..
        })
    ));
}

#[test]
fn test_t_statistics() {
    let t = t_statistics(&[2.0, -1.0], &[0.5, 0.25]).unwrap();
    assert_eq!(t, vec![4.0, -4.0]);
}

// ==================== Standardization ====================

#[test]
fn test_rescale() {
    assert_abs_diff_eq!(rescale(2.0, 4.0, 3.0), 1.5);
    assert_abs_diff_eq!(rescale(0.0, 4.0, 3.0), 0.75);
}

#[test]
fn test_standardize_with() {
    let (values, errors) = standardize_with(&[1.0, 2.0], &[0.2, 0.4], &[0.0, 3.0], 2.0).unwrap();
    assert_abs_diff_eq!(values[0], 0.5);
    assert_abs_diff_eq!(values[1], 3.0);
    assert_abs_diff_eq!(errors[0], 0.1);
    assert_abs_diff_eq!(errors[1], 0.6);

    assert!(standardize_with(&[1.0], &[0.2], &[1.0, 2.0], 1.0).is_err());
}

#[test]
fn test_standardize_from_model_data() {
    let data = StandardizationData::new(
        array![1.0, 2.0, 3.0, 4.0, 5.0],
        array![[1.0, 2.0], [1.0, 4.0], [1.0, 6.0], [1.0, 8.0], [1.0, 10.0]],
    );
    let model = ModelSnapshot::parse("y ~ x", vec![0.0, 0.5], vec![0.1, 0.05], 3)
        .unwrap()
        .with_standardization(data);

    let (values, errors) = standardize(&model, vec![0.0, 0.5], vec![0.1, 0.05]);

    let sd_y = 2.5_f64.sqrt();
    assert_abs_diff_eq!(values[0], 0.0);
    assert_abs_diff_eq!(errors[0], 0.1 / sd_y, epsilon = 1e-12);
    assert_abs_diff_eq!(values[1], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(errors[1], 0.1, epsilon = 1e-12);
}

#[test]
fn test_standardize_degrades_to_raw_values() {
    let (values, errors) = standardize(&BareModel, vec![1.0, 2.0], vec![0.5, 0.5]);
    assert_eq!(values, vec![1.0, 2.0]);
    assert_eq!(errors, vec![0.5, 0.5]);

    // constant response
    let data = StandardizationData::new(array![3.0, 3.0, 3.0], array![[1.0], [2.0], [3.0]]);
    let model = ModelSnapshot::parse("y ~ 0 + x", vec![1.0], vec![0.1], 2)
        .unwrap()
        .with_standardization(data);
    let (values, _) = standardize(&model, vec![1.0], vec![0.1]);
    assert_eq!(values, vec![1.0]);
}

#[test]
fn test_standard_deviations_requires_two_rows() {
    let data = StandardizationData::new(array![1.0], array![[1.0]]);
    assert!(matches!(
        data.standard_deviations(),
        Err(CapabilityError::Numerical { .. })
    ));
}

// ==================== Under-statistics ====================

#[test]
fn test_under_statistics() {
    let values = [1.0, -2.0];
    let errors = [0.5, 1.0];

    let se = UnderStatistic::StdError.compute(&values, &errors, 10).unwrap();
    assert_eq!(se, vec![UnderValue::Value(0.5), UnderValue::Value(1.0)]);

    let t = UnderStatistic::TStat.compute(&values, &errors, 10).unwrap();
    assert_eq!(t, vec![UnderValue::Value(2.0), UnderValue::Value(-2.0)]);
    assert_eq!(t[0].render(2), "(2.00)");
}

#[test]
fn test_confidence_interval() {
    let ci = UnderStatistic::ConfInt(0.95)
        .compute(&[1.0], &[0.5], 0)
        .unwrap();
    let UnderValue::Interval(lo, hi) = ci[0] else {
        panic!("expected an interval, got {:?}", ci[0]);
    };
    assert_abs_diff_eq!(lo, 1.0 - 1.959964 * 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(hi, 1.0 + 1.959964 * 0.5, epsilon = 1e-5);
    assert_eq!(ci[0].render(2), "(0.02, 1.98)");

    // Student t is wider than the normal limit
    let ci = UnderStatistic::ConfInt(0.95)
        .compute(&[1.0], &[0.5], 5)
        .unwrap();
    let UnderValue::Interval(lo_t, _) = ci[0] else {
        panic!("expected an interval");
    };
    assert!(lo_t < lo);
}

#[test]
fn test_confidence_interval_invalid_level() {
    for level in [0.0, 1.0, 95.0, f64::NAN] {
        let result = UnderStatistic::ConfInt(level).compute(&[1.0], &[0.5], 10);
        assert!(matches!(result, Err(ModelError::InvalidConfig { .. })));
    }
}

// ==================== Statistic registry ====================

#[test]
fn test_bare_model_has_no_statistics() {
    for kind in StatisticKind::ALL {
        let stat = RegressionStatistic::construct(kind, &BareModel);
        assert!(!stat.is_available(), "{:?} should be unavailable", kind);
        assert_eq!(stat.render(&AsciiRender), "");
    }
}

#[test]
fn test_aic_requires_log_likelihood() {
    let model = ModelSnapshot::parse("y ~ x", vec![1.0, 2.0], vec![0.1, 0.1], 8)
        .unwrap()
        .with_nobs(10)
        .with_dof(3);

    assert_eq!(
        model.aic(),
        Err(CapabilityError::MissingInput {
            capability: "aic",
            requires: "log_likelihood",
        })
    );
    assert_eq!(
        RegressionStatistic::construct(StatisticKind::Aic, &model).to_string(),
        ""
    );
    assert_eq!(
        RegressionStatistic::construct(StatisticKind::Nobs, &model).to_string(),
        "10"
    );
}

#[test]
fn test_non_finite_statistic_is_unavailable() {
    let model = ModelSnapshot::parse("y ~ x", vec![1.0, 2.0], vec![0.1, 0.1], 8)
        .unwrap()
        .with_r2(f64::NAN)
        .with_f_test(f64::INFINITY, 0.0);

    assert!(!RegressionStatistic::construct(StatisticKind::R2, &model).is_available());
    assert!(!RegressionStatistic::construct(StatisticKind::FStat, &model).is_available());
    assert!(RegressionStatistic::construct(StatisticKind::FStatPValue, &model).is_available());
}

#[test]
fn test_likelihood_statistics() {
    let model = likelihood_model();
    let value = |kind| {
        RegressionStatistic::construct(kind, &model)
            .value
            .unwrap_or(f64::NAN)
    };

    assert_abs_diff_eq!(value(StatisticKind::R2McFadden), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(
        value(StatisticKind::R2CoxSnell),
        1.0 - (-0.5_f64).exp(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        value(StatisticKind::R2Nagelkerke),
        (1.0 - (-0.5_f64).exp()) / (1.0 - (-1.0_f64).exp()),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(value(StatisticKind::R2Deviance), 0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(value(StatisticKind::AdjR2McFadden), 0.47, epsilon = 1e-12);
    assert_abs_diff_eq!(
        value(StatisticKind::AdjR2Deviance),
        1.0 - (40.0 * 199.0) / (100.0 * 197.0),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(value(StatisticKind::LogLikelihood), -50.0);
    assert_abs_diff_eq!(value(StatisticKind::Aic), 106.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        value(StatisticKind::Aicc),
        106.0 + 24.0 / 196.0,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        value(StatisticKind::Bic),
        100.0 + 3.0 * 200.0_f64.ln(),
        epsilon = 1e-12
    );
}

#[test]
fn test_pseudo_r2_aliases() {
    assert_eq!(PSEUDO_R2, StatisticKind::R2McFadden);
    assert_eq!(ADJ_PSEUDO_R2, StatisticKind::AdjR2McFadden);
}

#[test]
fn test_render_formats() {
    let nobs = RegressionStatistic::new(StatisticKind::Nobs, 200.0);
    let r2 = RegressionStatistic::new(StatisticKind::R2, 0.5);

    assert_eq!(nobs.render(&AsciiRender), "200");
    assert_eq!(r2.render(&AsciiRender), "0.500");
    assert_eq!(r2.to_string(), "0.500");
    assert_eq!(RegressionStatistic::unavailable(StatisticKind::R2).to_string(), "");
}

// ==================== Labels ====================

#[test]
fn test_labels_in_each_context() {
    use StatisticKind::*;

    assert_eq!(R2.label(&AsciiRender), "R2");
    assert_eq!(AdjR2.label(&AsciiRender), "Adjusted R2");
    assert_eq!(AdjR2McFadden.label(&AsciiRender), "McFadden Adjusted R2");
    assert_eq!(R2CoxSnell.label(&AsciiRender), "Cox-Snell R2");
    assert_eq!(Nobs.label(&AsciiRender), "N");
    assert_eq!(FStatIv.label(&AsciiRender), "First-stage F statistic");

    assert_eq!(AdjR2.label(&LatexRender), "Adjusted $R^2$");
    assert_eq!(Nobs.label(&LatexRender), "$N$");
    assert_eq!(R2Within.label(&HtmlRender), "Within-R<sup>2</sup>");
    assert_eq!(Nobs.label(&HtmlRender), "<i>N</i>");
}

#[test]
fn test_label_override_propagates_to_composites() {
    use StatisticKind::*;

    assert_eq!(R2.label(&RsqRender), "Rsq");
    assert_eq!(AdjR2.label(&RsqRender), "Adjusted Rsq");
    assert_eq!(AdjR2Deviance.label(&RsqRender), "Deviance Adjusted Rsq");
    assert_eq!(Bic.label(&RsqRender), "BIC");
}

#[test]
fn test_requested_labels() {
    let model = likelihood_model();

    let plain = StatisticRequest::from(StatisticKind::Nobs).resolve(&model);
    assert_eq!(plain.label(&AsciiRender), "N");
    assert_eq!(plain.render(&AsciiRender), "200");

    let custom = StatisticRequest::from((StatisticKind::Nobs, "Observations")).resolve(&model);
    assert_eq!(custom.label(&LatexRender), "Observations");

    let fixed = StatisticRequest::from(RegressionStatistic::new(StatisticKind::R2, 0.25))
        .labeled("Fit")
        .resolve(&BareModel);
    assert_eq!(fixed.label(&AsciiRender), "Fit");
    assert_eq!(fixed.render(&AsciiRender), "0.250");
}

// ==================== Regression types ====================

#[test]
fn test_regression_type_display() {
    assert_eq!(RegressionType::ols().to_string(), "OLS");
    assert_eq!(RegressionType::iv().to_string(), "IV");
    assert_eq!(RegressionType::glm(Family::Poisson).to_string(), "Poisson");
    assert_eq!(
        RegressionType::glm(Family::NegativeBinomial).to_string(),
        "Negative Binomial"
    );
    assert_eq!(RegressionType::NonLinear.to_string(), "NL");
    assert_eq!(RegressionType::Custom("Probit".into()).to_string(), "Probit");
    assert_eq!(RegressionType::ols().label(&AsciiRender), "Estimator");
}

#[test]
fn test_default_statistics() {
    use StatisticKind::*;

    assert_eq!(default_statistics(&RegressionType::ols()), vec![Nobs, R2]);
    assert_eq!(
        default_statistics(&RegressionType::iv()),
        vec![Nobs, R2, FStatIv]
    );
    assert_eq!(
        default_statistics(&RegressionType::glm(Family::Binomial)),
        vec![Nobs, R2McFadden]
    );
    assert_eq!(default_statistics(&RegressionType::NonLinear), vec![Nobs]);
}

#[test]
fn test_aux_value_display() {
    assert_eq!(AuxValue::Flag(true).to_string(), "Yes");
    assert_eq!(AuxValue::Flag(false).to_string(), "");
    assert_eq!(AuxValue::Text("firm".into()).to_string(), "firm");
}

// ==================== Property tests ====================

proptest! {
    #[test]
    fn prop_p_values_are_probabilities(
        coef in -1e3f64..1e3,
        se in 1e-3f64..1e3,
        dof in -5i64..500,
    ) {
        let p = p_values(&[coef], &[se], dof).unwrap();
        prop_assert!((0.0..=1.0).contains(&p[0]));
    }

    #[test]
    fn prop_p_values_symmetric_in_sign(coef in 0.0f64..50.0, se in 0.1f64..10.0, dof in 1i64..200) {
        let p = p_values(&[coef, -coef], &[se, se], dof).unwrap();
        prop_assert!((p[0] - p[1]).abs() < 1e-12);
    }

    #[test]
    fn prop_rescale_with_unit_sd_is_identity(value in -1e6f64..1e6) {
        prop_assert_eq!(rescale(1.0, 1.0, value), value);
    }
}
