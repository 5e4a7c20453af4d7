use crate::core::models::table::CoordinateTable;
use crate::engine::config::BimodalityConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::bimodality::{BimodalityVerdict, classify};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Classifies every column of `table` independently; verdicts keep column order.
#[instrument(skip_all, name = "bimodality_workflow")]
pub fn run(
    table: &CoordinateTable,
    config: &BimodalityConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<BimodalityVerdict>, EngineError> {
    info!(
        columns = table.n_columns(),
        snapshots = table.n_rows(),
        confidence_level = config.confidence_level,
        "Starting bimodality analysis."
    );

    let verdicts = reporter.phase("Bimodality", table.n_columns() as u64, || {
        #[cfg(not(feature = "parallel"))]
        let iterator = table.columns().iter();

        #[cfg(feature = "parallel")]
        let iterator = table.columns().par_iter();

        iterator
            .map(|series| {
                let verdict = classify(&series.name, &series.values, config);
                if let Ok(verdict) = &verdict {
                    for warning in &verdict.warnings {
                        reporter.report(Progress::Warning(format!("{}: {}", verdict.label, warning)));
                    }
                }
                reporter.report(Progress::TaskIncrement);
                verdict
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    info!(
        binormal = verdicts.iter().filter(|v| v.binormal()).count(),
        bimodal = verdicts.iter().filter(|v| v.bimodal).count(),
        "Bimodality analysis complete."
    );
    Ok(verdicts)
}
