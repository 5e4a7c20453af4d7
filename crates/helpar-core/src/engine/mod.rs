//! # Engine Module
//!
//! Analysis layer of the crate. It holds the configuration of every analysis, the
//! error taxonomy, progress reporting, and the per-unit tasks the workflows
//! dispatch.
//!
//! - **Configuration** ([`config`]): bimodality, correlation and stiffness settings,
//!   validated through [`config::AnalysisConfigBuilder`].
//! - **Error Handling** ([`error`]): input errors (malformed or too-short data) are
//!   kept apart from numerical errors (singular covariance, undefined correlation).
//! - **Progress Monitoring** ([`progress`]): callback-based event reporting.
//! - **Tasks** ([`tasks`]): stateless analyses of a single series or base-pair step.

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
