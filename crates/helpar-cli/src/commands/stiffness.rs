use super::load_step_coordinates;
use crate::cli::StiffnessArgs;
use crate::config::{ConfigOverrides, build_config};
use crate::error::Result;
use crate::utils::output::StiffnessPaths;
use helpar::core::io::traits::Tabular;
use helpar::engine::progress::ProgressReporter;
use helpar::workflows;
use tracing::info;

pub fn run(args: StiffnessArgs, reporter: &ProgressReporter) -> Result<()> {
    let config = build_config(&ConfigOverrides::from(&args))?;
    let steps = load_step_coordinates(&args.inputs)?;

    println!("Estimating stiffness of {} base-pair step(s)...", steps.n_steps());
    let results = workflows::stiffness::run(&steps, &config.stiffness, reporter)?;

    std::fs::create_dir_all(&args.output_dir)?;
    for result in &results {
        let paths = StiffnessPaths::new(&args.output_dir, &result.label);
        info!(
            step = %result.label,
            sum = result.force_constants.sum,
            "Writing stiffness tables to {:?}",
            &args.output_dir
        );
        result.covariance.write_csv_to_path(&paths.covariance)?;
        result.stiffness.write_csv_to_path(&paths.stiffness)?;
        result.force_constants.write_csv_to_path(&paths.force_constants)?;
        result.averages.write_csv_to_path(&paths.averages)?;
        println!(
            "  {} (sum of force constants: {:.4}) → {}",
            result.label,
            result.force_constants.sum,
            args.output_dir.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{wobble, write_ser};
    use super::*;
    use crate::cli::{ConfigArgs, SelectionArgs, StepInputArgs};
    use crate::error::CliError;
    use helpar::engine::error::{EngineError, NumericalError};
    use std::path::Path;

    fn step_inputs(dir: &Path, constant_twist: bool) -> StepInputArgs {
        let write = |name: &str, seed: u64, centre: f64, constant: bool| {
            let column: Vec<f64> = if constant {
                vec![centre; 60]
            } else {
                wobble(seed, 60).iter().map(|w| centre + w).collect()
            };
            write_ser(dir, &format!("{name}.ser"), &[column])
        };
        StepInputArgs {
            shift: write("shift", 11, 0.0, false),
            slide: write("slide", 12, -0.5, false),
            rise: write("rise", 13, 3.3, false),
            tilt: write("tilt", 14, 0.0, false),
            roll: write("roll", 15, 4.0, false),
            twist: write("twist", 16, 34.0, constant_twist),
            selection: SelectionArgs::default(),
        }
    }

    #[test]
    fn writes_four_tables_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("stiffness");
        let args = StiffnessArgs {
            inputs: step_inputs(dir.path(), false),
            output_dir: out.clone(),
            config: ConfigArgs::default(),
            kt: None,
        };
        run(args, &ProgressReporter::new()).unwrap();

        let fctes = std::fs::read_to_string(out.join("1_fctes.csv")).unwrap();
        let lines: Vec<&str> = fctes.lines().collect();
        assert_eq!(lines[0], ",fctes");
        assert_eq!(lines.len(), 9);
        assert!(lines[7].starts_with("product,"));
        assert!(lines[8].starts_with("sum,"));
        for table in ["covariance", "stiffness", "averages"] {
            assert!(out.join(format!("1_{table}.csv")).exists(), "{table}");
        }
    }

    #[test]
    fn constant_coordinate_is_reported_as_singular() {
        let dir = tempfile::tempdir().unwrap();
        let args = StiffnessArgs {
            inputs: step_inputs(dir.path(), true),
            output_dir: dir.path().join("out"),
            config: ConfigArgs::default(),
            kt: None,
        };
        assert!(matches!(
            run(args, &ProgressReporter::new()),
            Err(CliError::Engine(EngineError::Numerical(
                NumericalError::SingularCovariance { .. }
            )))
        ));
    }
}
