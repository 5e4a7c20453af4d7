use super::{load_table, resolve_parameter};
use crate::cli::BimodalityArgs;
use crate::config::{ConfigOverrides, build_config};
use crate::error::Result;
use helpar::core::io::traits::Tabular;
use helpar::engine::progress::ProgressReporter;
use helpar::workflows;
use tracing::info;

pub fn run(args: BimodalityArgs, reporter: &ProgressReporter) -> Result<()> {
    let config = build_config(&ConfigOverrides::from(&args))?;
    let parameter = resolve_parameter(args.parameter, &args.input);
    let table = load_table(&args.input, parameter, &args.selection)?;

    println!("Classifying {} column(s)...", table.n_columns());
    let verdicts = workflows::bimodality::run(&table, &config.bimodality, reporter)?;

    let binormal = verdicts.iter().filter(|v| v.binormal()).count();
    let bimodal = verdicts.iter().filter(|v| v.bimodal).count();
    info!(binormal, bimodal, "Writing verdicts to {:?}", &args.output);
    verdicts.write_csv_to_path(&args.output)?;

    println!(
        "✓ {} column(s) classified ({} binormal, {} bimodal), written to: {}",
        verdicts.len(),
        binormal,
        bimodal,
        args.output.display()
    );
    Ok(())
}
