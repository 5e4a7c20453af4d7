use super::{load_table, resolve_parameter};
use crate::cli::HistogramArgs;
use crate::error::Result;
use crate::utils::output::labelled_path;
use helpar::core::io::traits::Tabular;
use helpar::engine::progress::ProgressReporter;
use helpar::engine::tasks::histogram::BinRule;
use helpar::workflows;
use tracing::info;

pub fn run(args: HistogramArgs, reporter: &ProgressReporter) -> Result<()> {
    let parameter = resolve_parameter(args.parameter, &args.input);
    let table = load_table(&args.input, parameter, &args.selection)?;
    let rule = args.bins.map_or(BinRule::Auto, BinRule::Fixed);

    println!("Binning {} column(s)...", table.n_columns());
    let histograms = workflows::histogram::run(&table, rule, reporter);

    for histogram in &histograms {
        let path = labelled_path(&args.output, &histogram.label, histograms.len());
        info!("Writing histogram of {} to {:?}", histogram.label, &path);
        histogram.write_csv_to_path(&path)?;
    }
    println!("✓ {} histogram(s) written.", histograms.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::write_ser;
    use super::*;
    use crate::cli::SelectionArgs;
    use std::num::NonZeroUsize;

    #[test]
    fn fixed_bins_write_one_table_per_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_ser(
            dir.path(),
            "canal_rise.ser",
            &[vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![5.0, 5.0, 5.0, 5.0, 5.0]],
        );
        let args = HistogramArgs {
            input,
            parameter: None,
            selection: SelectionArgs::default(),
            bins: NonZeroUsize::new(4),
            output: dir.path().join("rise.csv"),
        };
        run(args, &ProgressReporter::new()).unwrap();

        let first = std::fs::read_to_string(dir.path().join("rise_1.csv")).unwrap();
        let lines: Vec<&str> = first.lines().collect();
        assert_eq!(lines[0], "lower,upper,count");
        assert_eq!(lines[1..], ["0,1,1", "1,2,1", "2,3,1", "3,4,2"]);

        let second = std::fs::read_to_string(dir.path().join("rise_2.csv")).unwrap();
        assert_eq!(second.lines().count(), 5);
    }
}
