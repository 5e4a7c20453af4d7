//! # Core Models Module
//!
//! This module contains the data structures that describe helical-parameter time series
//! as they enter the analysis engine.
//!
//! ## Overview
//!
//! A trajectory analysed with Curves+ yields, for every helical parameter, one time
//! series per base pair or base-pair step. These models:
//!
//! - **Name the parameters** - the twelve Curves+ descriptors with their statistical kind
//! - **Hold aligned samples** - tables of equal-length, finite, uniquely named series
//! - **Group step coordinates** - the six base-pair-step tables aligned column by column
//! - **Label positions** - sequence-derived labels for base pairs and steps
//!
//! ## Key Components
//!
//! - [`parameter`] - Helical parameters, coordinate kinds (circular/linear) and levels
//! - [`table`] - `CoordinateSeries` and `CoordinateTable` with structural validation
//! - [`step`] - `StepCoordinates`, the six aligned base-pair-step tables
//! - [`sequence`] - `Duplex` sequence labelling
//! - [`matrix`] - `StepMatrix`, a labelled 6×6 matrix over the step coordinates
//!
//! ## Usage
//!
//! ```ignore
//! use helpar::core::models::parameter::CoordinateKind;
//! use helpar::core::models::table::CoordinateTable;
//!
//! let table = CoordinateTable::from_columns(
//!     CoordinateKind::Circular,
//!     vec![("CGCG", vec![33.1, 35.4, 31.9])],
//! )?;
//! ```

pub mod matrix;
pub mod parameter;
pub mod sequence;
pub mod step;
pub mod table;
