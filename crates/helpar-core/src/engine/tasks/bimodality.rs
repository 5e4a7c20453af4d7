use super::model_selection::fit_models;
use crate::core::io::traits::{Record, format_optional, format_value};
use crate::core::stats::mixture::{ConvergenceWarning, MixtureComponent};
use crate::engine::config::BimodalityConfig;
use crate::engine::error::{EngineError, NumericalError};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Outcome of the Bayes-factor criterion; exactly one holds per series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normality {
    Uninormal,
    Binormal,
    InsufficientEvidence,
}

impl Normality {
    /// `p` is the posterior probability of the two-component model, `confidence_level` a percentage.
    pub fn from_probability(p: f64, confidence_level: f64) -> Self {
        let threshold = confidence_level / 100.0;
        if p < threshold {
            Normality::Uninormal
        } else if p > 1.0 - threshold {
            Normality::Binormal
        } else {
            Normality::InsufficientEvidence
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BimodalityVerdict {
    pub label: String,
    pub normality: Normality,
    /// Only ever true for binormal series.
    pub bimodal: bool,
    pub mean1: f64,
    pub var1: f64,
    pub w1: f64,
    pub mean2: Option<f64>,
    pub var2: Option<f64>,
    pub w2: f64,
    pub probability: f64,
    pub warnings: Vec<ConvergenceWarning>,
}

impl BimodalityVerdict {
    pub fn uninormal(&self) -> bool {
        self.normality == Normality::Uninormal
    }

    pub fn binormal(&self) -> bool {
        self.normality == Normality::Binormal
    }

    pub fn insufficient_evidence(&self) -> bool {
        self.normality == Normality::InsufficientEvidence
    }
}

impl Record for BimodalityVerdict {
    fn header() -> Vec<String> {
        [
            "coordinate",
            "binormal",
            "uninormal",
            "insuf_ev",
            "bimodal",
            "mean1",
            "mean2",
            "var1",
            "var2",
            "w1",
            "w2",
            "p",
        ]
        .map(String::from)
        .to_vec()
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.label.clone(),
            self.binormal().to_string(),
            self.uninormal().to_string(),
            self.insufficient_evidence().to_string(),
            self.bimodal.to_string(),
            format_value(self.mean1),
            format_optional(self.mean2),
            format_value(self.var1),
            format_optional(self.var2),
            format_value(self.w1),
            format_value(self.w2),
            format_value(self.probability),
        ]
    }
}

/// Helguero's criterion: two Gaussians form a bimodal mixture when their means are
/// further apart than a variance-ratio dependent multiple of the summed deviations.
pub fn helguero_bimodal(mean1: f64, var1: f64, mean2: f64, var2: f64) -> Result<bool, NumericalError> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(var1) || !usable(var2) {
        return Err(NumericalError::DegenerateVariance { var1, var2 });
    }
    let r = var1 / var2;
    let radicand = -2.0 + 3.0 * r + 3.0 * r.powi(2) - 2.0 * r.powi(3)
        + 2.0 * (1.0 - r + r.powi(2)).powf(1.5);
    let separation_factor = radicand.max(0.0).sqrt() / (r.sqrt() * (1.0 + r.sqrt()));
    Ok((mean2 - mean1).abs() > separation_factor * (var1.sqrt() + var2.sqrt()))
}

/// Lower mean first; equal means put the lower variance first.
fn component_order(a: &MixtureComponent, b: &MixtureComponent) -> Ordering {
    a.mean
        .total_cmp(&b.mean)
        .then_with(|| a.variance.total_cmp(&b.variance))
}

/// Classifies one series as uninormal, binormal or undecided, and tests binormal
/// fits for true bimodality.
#[instrument(level = "debug", skip_all, fields(series = label))]
pub fn classify(
    label: &str,
    values: &[f64],
    config: &BimodalityConfig,
) -> Result<BimodalityVerdict, EngineError> {
    let selection = fit_models(label, values, config)?;
    let probability = selection.probability_two_component()?;
    let normality = Normality::from_probability(probability, config.confidence_level);
    let warnings = selection.warnings();

    let verdict = if normality == Normality::Binormal {
        let mut components = selection.double.components.clone();
        components.sort_by(component_order);
        let (c1, c2) = (components[0], components[1]);
        BimodalityVerdict {
            label: label.to_string(),
            normality,
            bimodal: helguero_bimodal(c1.mean, c1.variance, c2.mean, c2.variance)?,
            mean1: c1.mean,
            var1: c1.variance,
            w1: c1.weight,
            mean2: Some(c2.mean),
            var2: Some(c2.variance),
            w2: c2.weight,
            probability,
            warnings,
        }
    } else {
        let c = selection.single.components[0];
        BimodalityVerdict {
            label: label.to_string(),
            normality,
            bimodal: false,
            mean1: c.mean,
            var1: c.variance,
            w1: c.weight,
            mean2: None,
            var2: None,
            w2: 0.0,
            probability,
            warnings,
        }
    };

    debug!(
        normality = ?verdict.normality,
        bimodal = verdict.bimodal,
        p = probability,
        "Series classified."
    );
    Ok(verdict)
}
