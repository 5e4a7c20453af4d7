use crate::core::models::table::CoordinateTable;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::averages::{AveragesRow, summarize};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[instrument(skip_all, name = "averages_workflow")]
pub fn run(table: &CoordinateTable, reporter: &ProgressReporter) -> Vec<AveragesRow> {
    info!(columns = table.n_columns(), "Computing column averages.");

    reporter.phase("Averages", table.n_columns() as u64, || {
        #[cfg(not(feature = "parallel"))]
        let iterator = table.columns().iter();

        #[cfg(feature = "parallel")]
        let iterator = table.columns().par_iter();

        iterator
            .map(|series| {
                let row = summarize(series);
                reporter.report(Progress::TaskIncrement);
                row
            })
            .collect()
    })
}
