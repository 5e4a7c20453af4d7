use thiserror::Error;

use crate::core::models::parameter::{CoordinateKind, HelicalParameter};
use crate::core::models::sequence::SequenceError;
use crate::core::models::step::StepError;
use crate::core::models::table::TableError;

/// Malformed input, reported before any computation is attempted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid table: {0}")]
    Table(#[from] TableError),

    #[error("Invalid step tables: {0}")]
    Step(#[from] StepError),

    #[error("Cannot label columns: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Series '{name}' has {found} samples; at least {required} are needed")]
    InsufficientSamples {
        name: String,
        required: usize,
        found: usize,
    },

    #[error("'{parameter}' of '{name}' must be {expected}, found {found}")]
    WrongKind {
        name: String,
        parameter: HelicalParameter,
        expected: CoordinateKind,
        found: CoordinateKind,
    },

    #[error("Series of step '{name}' have different lengths")]
    MisalignedStep { name: String },
}

/// A computation whose result would be NaN or infinite.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumericalError {
    #[error("Covariance matrix of step '{step}' is singular")]
    SingularCovariance { step: String },

    #[error("Correlation between {first} and {second} of step '{step}' is undefined")]
    UndefinedCorrelation {
        step: String,
        first: HelicalParameter,
        second: HelicalParameter,
    },

    #[error("Separation criterion needs positive variances (var1: {var1}, var2: {var2})")]
    DegenerateVariance { var1: f64, var2: f64 },

    #[error("Neither mixture model has a finite BIC (k=1: {bic_k1}, k=2: {bic_k2})")]
    UndefinedBic { bic_k1: f64, bic_k2: f64 },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Numerical error: {0}")]
    Numerical(#[from] NumericalError),
}

impl From<TableError> for EngineError {
    fn from(e: TableError) -> Self {
        EngineError::Input(e.into())
    }
}

impl From<StepError> for EngineError {
    fn from(e: StepError) -> Self {
        EngineError::Input(e.into())
    }
}

impl From<SequenceError> for EngineError {
    fn from(e: SequenceError) -> Self {
        EngineError::Input(e.into())
    }
}
