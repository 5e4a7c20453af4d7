//! # Workflows Module
//!
//! Table-level drivers. Each workflow runs one engine task over every independent
//! unit of its input (a column of a [`CoordinateTable`], or a base-pair step of a
//! [`StepCoordinates`](crate::core::models::step::StepCoordinates) set), in parallel
//! when the `parallel` feature is enabled, and reports progress through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter).
//!
//! Results always come back in input column order.
//!
//! - [`bimodality`] classifies each column as uninormal, binormal or undecided.
//! - [`correlation`] builds one 6×6 correlation matrix per step.
//! - [`stiffness`] estimates covariance, stiffness and force constants per step.
//! - [`averages`] summarises each column by mean and standard deviation.
//! - [`histogram`] bins each column.

pub mod averages;
pub mod bimodality;
pub mod correlation;
pub mod histogram;
pub mod stiffness;

use crate::core::models::parameter::ParameterLevel;
use crate::core::models::sequence::Duplex;
use crate::core::models::table::CoordinateTable;
use crate::engine::error::EngineError;

/// Renames the columns of `table` after the base pairs or steps of `duplex`.
///
/// A step-level table yields one label fewer than it has columns; the trailing
/// column has no complete step and is dropped.
pub fn label_by_sequence(
    table: CoordinateTable,
    level: ParameterLevel,
    duplex: &Duplex,
) -> Result<CoordinateTable, EngineError> {
    let count = table.n_columns().saturating_sub(level.step());
    let labels = duplex.labels(level, count)?;
    Ok(table.truncate(count)?.relabel(labels)?)
}
