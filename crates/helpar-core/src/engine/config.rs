use thiserror::Error;

pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 5.0;
pub const DEFAULT_MAX_ITERATIONS: usize = 400;
pub const DEFAULT_TOLERANCE: f64 = 1e-5;
/// Thermal energy at 298 K in kcal/mol.
pub const DEFAULT_KT: f64 = 0.592186827;
/// Brings angular force constants (tilt, roll, twist) to units comparable with the translational ones.
pub const DEFAULT_SCALING: [f64; 6] = [1.0, 1.0, 1.0, 10.6, 10.6, 10.6];

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {value} ({reason})")]
    InvalidValue {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BimodalityConfig {
    /// Percentage; a model is accepted when its posterior probability clears `1 - c/100`.
    pub confidence_level: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for BimodalityConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StiffnessConfig {
    pub kt: f64,
    pub scaling: [f64; 6],
}

impl Default for StiffnessConfig {
    fn default() -> Self {
        Self {
            kt: DEFAULT_KT,
            scaling: DEFAULT_SCALING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrelationConfig {
    /// Store NaN for undefined correlations instead of failing.
    pub allow_undefined: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisConfig {
    pub bimodality: BimodalityConfig,
    pub stiffness: StiffnessConfig,
    pub correlation: CorrelationConfig,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    confidence_level: Option<f64>,
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
    kt: Option<f64>,
    scaling: Option<[f64; 6]>,
    allow_undefined: Option<bool>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confidence_level(mut self, percent: f64) -> Self {
        self.confidence_level = Some(percent);
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn kt(mut self, kt: f64) -> Self {
        self.kt = Some(kt);
        self
    }
    pub fn scaling(mut self, scaling: [f64; 6]) -> Self {
        self.scaling = Some(scaling);
        self
    }
    pub fn allow_undefined(mut self, allow: bool) -> Self {
        self.allow_undefined = Some(allow);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let bimodality = BimodalityConfig {
            confidence_level: self.confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL),
            max_iterations: self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
            tolerance: self.tolerance.unwrap_or(DEFAULT_TOLERANCE),
        };
        let stiffness = StiffnessConfig {
            kt: self.kt.unwrap_or(DEFAULT_KT),
            scaling: self.scaling.unwrap_or(DEFAULT_SCALING),
        };
        let correlation = CorrelationConfig {
            allow_undefined: self.allow_undefined.unwrap_or(false),
        };

        let c = bimodality.confidence_level;
        // Above 50% the uninormal and binormal acceptance regions would overlap.
        if !(c > 0.0 && c <= 50.0) {
            return Err(invalid("confidence_level", c, "must be in (0, 50]"));
        }
        if bimodality.max_iterations == 0 {
            return Err(invalid("max_iterations", 0, "must be at least 1"));
        }
        if !(bimodality.tolerance.is_finite() && bimodality.tolerance > 0.0) {
            return Err(invalid(
                "tolerance",
                bimodality.tolerance,
                "must be positive and finite",
            ));
        }
        if !(stiffness.kt.is_finite() && stiffness.kt > 0.0) {
            return Err(invalid("kt", stiffness.kt, "must be positive and finite"));
        }
        if stiffness.scaling.iter().any(|s| !s.is_finite()) {
            return Err(invalid(
                "scaling",
                format!("{:?}", stiffness.scaling),
                "entries must be finite",
            ));
        }

        Ok(AnalysisConfig {
            bimodality,
            stiffness,
            correlation,
        })
    }
}

fn invalid(parameter: &'static str, value: impl ToString, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        parameter,
        value: value.to_string(),
        reason,
    }
}
