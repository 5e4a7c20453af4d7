use crate::core::models::step::StepCoordinates;
use crate::engine::config::StiffnessConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::stiffness::{StiffnessResult, estimate};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Estimates the stiffness of every base-pair step, in column order.
#[instrument(skip_all, name = "stiffness_workflow")]
pub fn run(
    steps: &StepCoordinates,
    config: &StiffnessConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<StiffnessResult>, EngineError> {
    info!(
        steps = steps.n_steps(),
        snapshots = steps.n_snapshots(),
        kt = config.kt,
        "Starting stiffness analysis."
    );

    let step_series: Vec<_> = steps.steps().collect();

    let results = reporter.phase("Stiffness", step_series.len() as u64, || {
        #[cfg(not(feature = "parallel"))]
        let iterator = step_series.iter();

        #[cfg(feature = "parallel")]
        let iterator = step_series.par_iter();

        iterator
            .map(|step| {
                let result = estimate(step, config);
                reporter.report(Progress::TaskIncrement);
                result
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    info!(results = results.len(), "Stiffness analysis complete.");
    Ok(results)
}
