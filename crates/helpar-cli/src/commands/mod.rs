pub mod averages;
pub mod bimodality;
pub mod correlation;
pub mod histogram;
pub mod stiffness;

use crate::cli::{SelectionArgs, StepInputArgs};
use crate::error::Result;
use helpar::core::io::reader::{ReadOptions, read_table};
use helpar::core::models::parameter::{CoordinateKind, HelicalParameter};
use helpar::core::models::step::StepCoordinates;
use helpar::core::models::table::CoordinateTable;
use helpar::engine::error::EngineError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The explicit parameter, or the first parameter name found in the file stem.
fn resolve_parameter(explicit: Option<HelicalParameter>, path: &Path) -> Option<HelicalParameter> {
    explicit.or_else(|| {
        let stem = path.file_stem()?.to_string_lossy();
        let detected = HelicalParameter::detect_in(&stem);
        debug!(file = %path.display(), parameter = ?detected, "Guessed parameter from file name.");
        detected
    })
}

fn read_options(kind: CoordinateKind, usecols: Option<&[usize]>, trim_terminal: bool) -> ReadOptions {
    let options = ReadOptions::new(kind).trim_terminal(trim_terminal);
    match usecols {
        Some(columns) => options.usecols(columns.to_vec()),
        None => options,
    }
}

/// Reads one table, tagged with the kind of `parameter` (linear when unknown).
fn load_table(
    path: &Path,
    parameter: Option<HelicalParameter>,
    selection: &SelectionArgs,
) -> Result<CoordinateTable> {
    let kind = parameter.map_or(CoordinateKind::Linear, |p| p.kind());
    info!("Loading input table from {:?}", path);
    let options = read_options(kind, selection.usecols.as_deref(), selection.trim_terminal);
    Ok(read_table(path, &options)?)
}

/// Reads the six step tables and checks they describe the same steps.
fn load_step_coordinates(inputs: &StepInputArgs) -> Result<StepCoordinates> {
    let [shift, slide, rise, tilt, roll, twist] = inputs.paths();
    let read = |path: &PathBuf, parameter: HelicalParameter| {
        load_table(path, Some(parameter), &inputs.selection)
    };
    let tables = [
        read(shift, HelicalParameter::Shift)?,
        read(slide, HelicalParameter::Slide)?,
        read(rise, HelicalParameter::Rise)?,
        read(tilt, HelicalParameter::Tilt)?,
        read(roll, HelicalParameter::Roll)?,
        read(twist, HelicalParameter::Twist)?,
    ];
    Ok(StepCoordinates::new(tables).map_err(EngineError::from)?)
}
