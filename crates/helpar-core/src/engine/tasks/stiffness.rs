use super::validate_step;
use crate::core::io::traits::{Tabular, format_value};
use crate::core::models::matrix::StepMatrix;
use crate::core::models::parameter::{CoordinateKind, STEP_COORDINATES};
use crate::core::models::step::StepSeries;
use crate::core::stats::circular::{AngleUnit, circular_mean};
use crate::core::stats::descriptive::{covariance, mean};
use crate::engine::config::StiffnessConfig;
use crate::engine::error::{EngineError, NumericalError};
use nalgebra::Matrix6;
use tracing::{debug, instrument};

/// A Cholesky pivot below this fraction of its coordinate's variance marks a
/// coordinate as (numerically) a linear combination of the preceding ones.
const SINGULARITY_THRESHOLD: f64 = 1e-12;

/// Per-coordinate averages of one step: circular means for the angular coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepAverages {
    pub values: [f64; 6],
}

/// Scaled diagonal of the stiffness matrix with its product and sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceConstants {
    pub values: [f64; 6],
    pub product: f64,
    pub sum: f64,
}

impl ForceConstants {
    fn from_diagonal(stiffness: &Matrix6<f64>, scaling: &[f64; 6]) -> Self {
        let values: [f64; 6] = std::array::from_fn(|i| stiffness[(i, i)] * scaling[i]);
        Self {
            values,
            product: values.iter().product(),
            sum: values.iter().sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StiffnessResult {
    pub label: String,
    pub averages: StepAverages,
    pub covariance: StepMatrix,
    pub stiffness: StepMatrix,
    pub force_constants: ForceConstants,
}

impl Tabular for StepAverages {
    fn header(&self) -> Vec<String> {
        vec![String::new(), "avg".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        STEP_COORDINATES
            .iter()
            .zip(self.values)
            .map(|(p, v)| vec![p.name().to_string(), format_value(v)])
            .collect()
    }
}

impl Tabular for ForceConstants {
    fn header(&self) -> Vec<String> {
        vec![String::new(), "fctes".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        STEP_COORDINATES
            .iter()
            .map(|p| p.name())
            .zip(self.values)
            .chain([("product", self.product), ("sum", self.sum)])
            .map(|(name, v)| vec![name.to_string(), format_value(v)])
            .collect()
    }
}

pub fn step_averages(step: &StepSeries) -> StepAverages {
    StepAverages {
        values: std::array::from_fn(|i| {
            let series = step.series[i];
            match series.kind {
                CoordinateKind::Linear => mean(&series.values),
                CoordinateKind::Circular => circular_mean(&series.values, AngleUnit::Degrees),
            }
        }),
    }
}

/// Sample covariance of the six coordinates.
///
/// Angles enter as plain numbers. This linear treatment of angular covariance is
/// kept so force constants stay comparable with published Canal-based values.
pub fn covariance_matrix(step: &StepSeries) -> Matrix6<f64> {
    let mut matrix = Matrix6::zeros();
    for i in 0..6 {
        for j in i..6 {
            let c = covariance(&step.series[i].values, &step.series[j].values);
            matrix[(i, j)] = c;
            matrix[(j, i)] = c;
        }
    }
    matrix
}

/// Inverts the covariance matrix through its Cholesky factor and scales by `kt`.
///
/// A matrix that is not positive definite (constant or collinear coordinates) is
/// singular for this purpose, including when positivity only survives through
/// round-off.
pub fn stiffness_matrix(
    label: &str,
    covariance: &Matrix6<f64>,
    kt: f64,
) -> Result<Matrix6<f64>, NumericalError> {
    let singular = || NumericalError::SingularCovariance {
        step: label.to_string(),
    };
    if covariance.iter().any(|v| !v.is_finite()) {
        return Err(singular());
    }
    let cholesky = covariance.cholesky().ok_or_else(singular)?;
    let l = cholesky.l_dirty();
    if (0..6).any(|i| l[(i, i)].powi(2) <= SINGULARITY_THRESHOLD * covariance[(i, i)]) {
        return Err(singular());
    }
    let inverse = cholesky.inverse();
    if inverse.iter().any(|v| !v.is_finite()) {
        return Err(singular());
    }
    Ok(inverse * kt)
}

/// Elastic description of one base-pair step: averages, covariance, stiffness
/// matrix and scaled force constants.
#[instrument(level = "debug", skip_all, fields(step = step.label))]
pub fn estimate(step: &StepSeries, config: &StiffnessConfig) -> Result<StiffnessResult, EngineError> {
    validate_step(step, 2)?;

    let averages = step_averages(step);
    let covariance = covariance_matrix(step);
    let stiffness = stiffness_matrix(step.label, &covariance, config.kt)?;
    let force_constants = ForceConstants::from_diagonal(&stiffness, &config.scaling);

    debug!(
        sum = force_constants.sum,
        product = force_constants.product,
        "Stiffness estimated."
    );

    Ok(StiffnessResult {
        label: step.label.to_string(),
        averages,
        covariance: StepMatrix::new(step.label, covariance),
        stiffness: StepMatrix::new(step.label, stiffness),
        force_constants,
    })
}
