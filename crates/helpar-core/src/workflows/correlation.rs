use crate::core::models::matrix::StepMatrix;
use crate::core::models::step::StepCoordinates;
use crate::engine::config::CorrelationConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::correlation::correlation_matrix;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds one correlation matrix per base-pair step, in column order.
#[instrument(skip_all, name = "correlation_workflow")]
pub fn run(
    steps: &StepCoordinates,
    config: &CorrelationConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<StepMatrix>, EngineError> {
    info!(
        steps = steps.n_steps(),
        snapshots = steps.n_snapshots(),
        "Starting correlation analysis."
    );

    let step_series: Vec<_> = steps.steps().collect();

    let matrices = reporter.phase("Correlation", step_series.len() as u64, || {
        #[cfg(not(feature = "parallel"))]
        let iterator = step_series.iter();

        #[cfg(feature = "parallel")]
        let iterator = step_series.par_iter();

        iterator
            .map(|step| {
                let matrix = correlation_matrix(step, config);
                reporter.report(Progress::TaskIncrement);
                matrix
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    info!(matrices = matrices.len(), "Correlation analysis complete.");
    Ok(matrices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::parameter::{HelicalParameter, STEP_COORDINATES};
    use crate::core::models::table::CoordinateTable;
    use crate::test_utils::normal_samples;

    fn steps(labels: &[&str]) -> StepCoordinates {
        let tables = std::array::from_fn(|i| {
            CoordinateTable::from_columns(
                STEP_COORDINATES[i].kind(),
                labels.iter().enumerate().map(|(j, l)| {
                    (*l, normal_samples(10.0 * i as f64, 2.0, 200, (10 * i + j) as u64))
                }),
            )
            .unwrap()
        });
        StepCoordinates::new(tables).unwrap()
    }

    #[test]
    fn run_produces_one_matrix_per_step_in_order() {
        let matrices = run(
            &steps(&["CGCG", "GCGA", "CGAA"]),
            &CorrelationConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        let labels: Vec<_> = matrices.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["CGCG", "GCGA", "CGAA"]);
        for m in &matrices {
            assert!(m.is_symmetric(0.0));
            assert_eq!(
                m.get(STEP_COORDINATES[3], HelicalParameter::Tilt),
                Some(1.0)
            );
        }
    }
}
