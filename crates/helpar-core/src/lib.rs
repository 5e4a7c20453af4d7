//! # Helpar Core Library
//!
//! A statistics engine for DNA helical-parameter time series produced by molecular
//! dynamics trajectories analysed with Curves+ and Canal.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep a clear separation of
//! concerns.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`CoordinateTable`,
//!   `StepCoordinates`), numerical primitives (circular statistics, Gaussian mixture EM),
//!   and table I/O.
//!
//! - **[`engine`]: The Logic Core.** Analysis configuration, the error taxonomy, progress
//!   reporting, and the per-unit analysis tasks: bimodality classification of one series,
//!   the correlation matrix and stiffness estimate of one base-pair step, averages and
//!   histograms.
//!
//! - **[`workflows`]: The Public API.** Runs the engine tasks over whole tables (every
//!   column, or every base-pair step of six aligned tables), in parallel when the
//!   `parallel` feature is enabled, and returns labelled results ready to be written.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_utils;
