//! Provides input/output for helical-parameter tables and analysis results.
//!
//! Coordinate tables are read from Curves+ `.ser` series files or from CSV tables
//! with a leading index column. Results are written back as CSV through the
//! [`traits::Tabular`] trait.

pub mod reader;
pub mod traits;
