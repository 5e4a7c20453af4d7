use super::read_options;
use crate::cli::AveragesArgs;
use crate::error::Result;
use helpar::core::io::reader::read_table;
use helpar::core::io::traits::Tabular;
use helpar::core::models::sequence::Duplex;
use helpar::engine::error::EngineError;
use helpar::engine::progress::ProgressReporter;
use helpar::workflows;
use tracing::info;

/// Terminal base pairs are always dropped, from the table and from both strands.
pub fn run(args: AveragesArgs, reporter: &ProgressReporter) -> Result<()> {
    let duplex = Duplex::new(&args.strand1, &args.strand2)
        .map_err(EngineError::from)?
        .trimmed();

    info!("Loading input table from {:?}", &args.input);
    let options = read_options(args.parameter.kind(), args.usecols.as_deref(), true);
    let table = read_table(&args.input, &options)?;
    let table = workflows::label_by_sequence(table, args.parameter.level(), &duplex)?;

    println!("Averaging {} {} column(s)...", table.n_columns(), args.parameter);
    let rows = workflows::averages::run(&table, reporter);
    rows.write_csv_to_path(&args.output)?;

    println!("✓ Averages written to: {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::write_ser;
    use super::*;
    use crate::error::CliError;
    use helpar::core::models::parameter::HelicalParameter;

    fn args(dir: &std::path::Path, parameter: HelicalParameter, strand1: &str) -> AveragesArgs {
        let columns: Vec<Vec<f64>> = (1..=6)
            .map(|c| vec![10.0 * c as f64, 10.0 * c as f64 + 2.0])
            .collect();
        AveragesArgs {
            input: write_ser(dir, "canal.ser", &columns),
            parameter,
            strand1: strand1.to_string(),
            strand2: "AATGCT".to_string(),
            usecols: None,
            output: dir.join("averages.csv"),
        }
    }

    #[test]
    fn step_parameter_rows_are_labelled_by_step() {
        let dir = tempfile::tempdir().unwrap();
        run(args(dir.path(), HelicalParameter::Twist, "AGCATT"), &ProgressReporter::new()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("averages.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "label,mean,std");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("GCGC,21,"));
        assert!(lines[2].starts_with("CATG,31,"));
        assert!(lines[3].starts_with("ATAT,41,"));
    }

    #[test]
    fn base_pair_parameter_rows_are_labelled_by_pair() {
        let dir = tempfile::tempdir().unwrap();
        run(args(dir.path(), HelicalParameter::Propel, "AGCATT"), &ProgressReporter::new()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("averages.csv")).unwrap();
        let labels: Vec<&str> = content
            .lines()
            .skip(1)
            .filter_map(|l| l.split(',').next())
            .collect();
        assert_eq!(labels, vec!["GC", "CG", "AT", "TA"]);
    }

    #[test]
    fn mismatched_strands_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(args(dir.path(), HelicalParameter::Twist, "AGCA"), &ProgressReporter::new());
        assert!(matches!(result, Err(CliError::Engine(EngineError::Input(_)))));
    }
}
