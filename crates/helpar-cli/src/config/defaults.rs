use helpar::engine::config::{
    DEFAULT_CONFIDENCE_LEVEL, DEFAULT_KT, DEFAULT_MAX_ITERATIONS, DEFAULT_SCALING,
    DEFAULT_TOLERANCE,
};

pub struct DefaultsConfig {
    pub confidence_level: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub kt: f64,
    pub scaling: [f64; 6],
    pub allow_undefined: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            kt: DEFAULT_KT,
            scaling: DEFAULT_SCALING,
            allow_undefined: false,
        }
    }
}
