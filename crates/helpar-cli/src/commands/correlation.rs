use super::load_step_coordinates;
use crate::cli::CorrelationArgs;
use crate::config::{ConfigOverrides, build_config};
use crate::error::Result;
use crate::utils::output::labelled_path;
use helpar::core::io::traits::Tabular;
use helpar::engine::progress::ProgressReporter;
use helpar::workflows;
use tracing::info;

pub fn run(args: CorrelationArgs, reporter: &ProgressReporter) -> Result<()> {
    let config = build_config(&ConfigOverrides::from(&args))?;
    let steps = load_step_coordinates(&args.inputs)?;

    println!("Correlating {} base-pair step(s)...", steps.n_steps());
    let matrices = workflows::correlation::run(&steps, &config.correlation, reporter)?;

    for matrix in &matrices {
        let path = labelled_path(&args.output, &matrix.label, matrices.len());
        info!("Writing correlation matrix of {} to {:?}", matrix.label, &path);
        matrix.write_csv_to_path(&path)?;
        println!("  {} → {}", matrix.label, path.display());
    }
    Ok(())
}
