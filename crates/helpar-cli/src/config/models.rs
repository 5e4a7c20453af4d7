use crate::cli::{BimodalityArgs, ConfigArgs, CorrelationArgs, StiffnessArgs};
use std::path::PathBuf;

/// Configuration inputs gathered from one subcommand's arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub set_values: Vec<String>,
    pub confidence_level: Option<f64>,
    pub max_iterations: Option<usize>,
    pub tolerance: Option<f64>,
    pub kt: Option<f64>,
    /// A set flag always wins; an unset flag defers to file and defaults.
    pub allow_undefined: bool,
}

impl ConfigOverrides {
    fn from_config_args(args: &ConfigArgs) -> Self {
        Self {
            config_path: args.config.clone(),
            set_values: args.set_values.clone(),
            ..Self::default()
        }
    }
}

impl From<&BimodalityArgs> for ConfigOverrides {
    fn from(args: &BimodalityArgs) -> Self {
        Self {
            confidence_level: args.confidence_level,
            max_iterations: args.max_iterations,
            tolerance: args.tolerance,
            ..Self::from_config_args(&args.config)
        }
    }
}

impl From<&CorrelationArgs> for ConfigOverrides {
    fn from(args: &CorrelationArgs) -> Self {
        Self {
            allow_undefined: args.allow_undefined,
            ..Self::from_config_args(&args.config)
        }
    }
}

impl From<&StiffnessArgs> for ConfigOverrides {
    fn from(args: &StiffnessArgs) -> Self {
        Self {
            kt: args.kt,
            ..Self::from_config_args(&args.config)
        }
    }
}
