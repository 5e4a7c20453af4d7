//! # Core Module
//!
//! This module provides the stateless building blocks of the analysis engine: the data
//! models that describe helical-parameter time series, the numerical primitives that
//! operate on them, and table I/O.
//!
//! ## Architecture
//!
//! - **Data Representation** ([`models`]) - Helical parameters, coordinate series and tables,
//!   aligned base-pair-step coordinates, and sequence labels
//! - **Numerical Primitives** ([`stats`]) - Descriptive and circular statistics, and the
//!   Gaussian mixture fit used for model selection
//! - **File I/O** ([`io`]) - Reading `.ser`/`.csv` tables and writing result tables
//!
//! Nothing in this module keeps state between calls. Circular quantities are handled
//! exclusively by [`stats::circular`]; every other component reaches angular data
//! through it.

pub mod io;
pub mod models;
pub mod stats;
