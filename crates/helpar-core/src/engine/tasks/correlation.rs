use super::validate_step;
use crate::core::models::matrix::StepMatrix;
use crate::core::models::parameter::{CoordinateKind, STEP_COORDINATES};
use crate::core::models::step::StepSeries;
use crate::core::models::table::CoordinateSeries;
use crate::core::stats::circular::{circular_circular_correlation, circular_linear_correlation};
use crate::core::stats::descriptive::pearson;
use crate::engine::config::CorrelationConfig;
use crate::engine::error::{EngineError, NumericalError};
use itertools::Itertools;
use nalgebra::Matrix6;
use tracing::{instrument, warn};

/// Correlation of two series, choosing the estimator from their kinds.
///
/// Symmetric in its arguments: a linear/circular pair is always passed to the
/// circular-linear estimator with the linear series first.
pub fn correlate(a: &CoordinateSeries, b: &CoordinateSeries) -> f64 {
    match (a.kind, b.kind) {
        (CoordinateKind::Linear, CoordinateKind::Linear) => pearson(&a.values, &b.values),
        (CoordinateKind::Linear, CoordinateKind::Circular) => {
            circular_linear_correlation(&a.values, &b.values)
        }
        (CoordinateKind::Circular, CoordinateKind::Linear) => {
            circular_linear_correlation(&b.values, &a.values)
        }
        (CoordinateKind::Circular, CoordinateKind::Circular) => {
            circular_circular_correlation(&a.values, &b.values)
        }
    }
}

/// Builds the symmetric 6×6 correlation matrix of one base-pair step.
///
/// Each unordered pair is computed once and mirrored; the diagonal is fixed at 1.
/// An undefined correlation (e.g. a constant series) is an error unless
/// `config.allow_undefined` is set, in which case NaN is stored.
#[instrument(level = "debug", skip_all, fields(step = step.label))]
pub fn correlation_matrix(
    step: &StepSeries,
    config: &CorrelationConfig,
) -> Result<StepMatrix, EngineError> {
    validate_step(step, 2)?;

    let mut matrix = Matrix6::identity();
    for (i, j) in (0..6).tuple_combinations() {
        let r = correlate(step.series[i], step.series[j]);
        if r.is_nan() {
            if !config.allow_undefined {
                return Err(NumericalError::UndefinedCorrelation {
                    step: step.label.to_string(),
                    first: STEP_COORDINATES[i],
                    second: STEP_COORDINATES[j],
                }
                .into());
            }
            warn!(
                step = step.label,
                first = %STEP_COORDINATES[i],
                second = %STEP_COORDINATES[j],
                "Correlation is undefined; storing NaN."
            );
        }
        matrix[(i, j)] = r;
        matrix[(j, i)] = r;
    }

    Ok(StepMatrix::new(step.label, matrix))
}
