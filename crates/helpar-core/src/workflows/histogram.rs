use crate::core::models::table::CoordinateTable;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::histogram::{BinRule, Histogram, histogram};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[instrument(skip_all, name = "histogram_workflow")]
pub fn run(table: &CoordinateTable, rule: BinRule, reporter: &ProgressReporter) -> Vec<Histogram> {
    info!(columns = table.n_columns(), ?rule, "Binning columns.");

    reporter.phase("Histograms", table.n_columns() as u64, || {
        #[cfg(not(feature = "parallel"))]
        let iterator = table.columns().iter();

        #[cfg(feature = "parallel")]
        let iterator = table.columns().par_iter();

        iterator
            .map(|series| {
                let h = histogram(series, rule);
                reporter.report(Progress::TaskIncrement);
                h
            })
            .collect()
    })
}
