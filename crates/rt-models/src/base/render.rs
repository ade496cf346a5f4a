//! Render contexts: how an output style spells the labels it needs
//!
//! The writers themselves live outside this crate; a context only answers
//! questions about labels and number formatting.

use super::statistics::StatisticKind;

/// Output style capability consulted when resolving labels
pub trait RenderContext {
    /// Base label of the coefficient of determination
    fn r2(&self) -> String {
        "R2".to_string()
    }

    /// Label of the number of observations
    fn nobs(&self) -> String {
        "N".to_string()
    }

    /// Label of the regression type row
    fn estimator_label(&self) -> String {
        "Estimator".to_string()
    }

    /// Digits after the decimal point for floating-point statistics
    fn digits(&self) -> usize {
        3
    }

    /// Replace the label of a statistic kind outright.
    ///
    /// Composite labels are built from their base kind's resolved label, so
    /// overriding [`StatisticKind::R2`] also changes "Adjusted R2" and friends.
    fn label_override(&self, _kind: StatisticKind) -> Option<String> {
        None
    }
}

/// Plain-text tables
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiRender;

impl RenderContext for AsciiRender {}

/// LaTeX tables
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexRender;

impl RenderContext for LatexRender {
    fn r2(&self) -> String {
        "$R^2$".to_string()
    }

    fn nobs(&self) -> String {
        "$N$".to_string()
    }
}

/// HTML tables
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRender;

impl RenderContext for HtmlRender {
    fn r2(&self) -> String {
        "R<sup>2</sup>".to_string()
    }

    fn nobs(&self) -> String {
        "<i>N</i>".to_string()
    }
}
