//! Per-unit analysis tasks.
//!
//! Each task analyses one independent unit, either a single coordinate series or the
//! six coordinate series of one base-pair step, and holds no state between calls.
//! The workflows run them across whole tables.

pub mod averages;
pub mod bimodality;
pub mod correlation;
pub mod histogram;
pub mod model_selection;
pub mod stiffness;

use crate::core::models::parameter::STEP_COORDINATES;
use crate::core::models::step::StepSeries;
use crate::engine::error::InputError;

/// Checks that the six series of a step carry their coordinates' kinds, share one
/// length, and hold at least `min_samples` samples. Returns the common length.
pub(crate) fn validate_step(step: &StepSeries, min_samples: usize) -> Result<usize, InputError> {
    let n = step.series[0].len();
    for (parameter, series) in STEP_COORDINATES.iter().zip(step.series) {
        if series.kind != parameter.kind() {
            return Err(InputError::WrongKind {
                name: step.label.to_string(),
                parameter: *parameter,
                expected: parameter.kind(),
                found: series.kind,
            });
        }
        if series.len() != n {
            return Err(InputError::MisalignedStep {
                name: step.label.to_string(),
            });
        }
    }
    if n < min_samples {
        return Err(InputError::InsufficientSamples {
            name: step.label.to_string(),
            required: min_samples,
            found: n,
        });
    }
    Ok(n)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::models::parameter::STEP_COORDINATES;
    use crate::core::models::table::CoordinateSeries;

    /// Six series in step-coordinate order, each tagged with its coordinate's kind.
    pub fn step_series(values: [Vec<f64>; 6]) -> [CoordinateSeries; 6] {
        let mut i = 0;
        values.map(|v| {
            let parameter = STEP_COORDINATES[i];
            i += 1;
            CoordinateSeries::new(parameter.name(), parameter.kind(), v)
        })
    }
}
