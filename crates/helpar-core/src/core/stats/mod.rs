//! Numerical primitives shared by the analysis tasks.
//!
//! - [`descriptive`] - mean, sample covariance, Pearson correlation, quantiles
//! - [`circular`] - circular mean and the circular-circular / circular-linear correlations
//! - [`mixture`] - Expectation-Maximization fit of univariate Gaussian mixtures with BIC

pub mod circular;
pub mod descriptive;
pub mod mixture;
