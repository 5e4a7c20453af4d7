use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Statistical treatment a coordinate requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateKind {
    /// Angles in degrees, defined modulo 360.
    Circular,
    /// Ordinary real-valued quantities (lengths in Ångström).
    Linear,
}

impl fmt::Display for CoordinateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateKind::Circular => write!(f, "circular"),
            CoordinateKind::Linear => write!(f, "linear"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterLevel {
    BasePair,
    BasePairStep,
}

impl ParameterLevel {
    /// Number of extra bases a label spans beyond the first one.
    pub fn step(&self) -> usize {
        match self {
            ParameterLevel::BasePair => 0,
            ParameterLevel::BasePairStep => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelicalParameter {
    Shift,
    Slide,
    Rise,
    Tilt,
    Roll,
    Twist,
    Shear,
    Stretch,
    Stagger,
    Buckle,
    Propel,
    Opening,
}

/// The six base-pair-step coordinates, in the order used for every 6×6 matrix.
pub const STEP_COORDINATES: [HelicalParameter; 6] = [
    HelicalParameter::Shift,
    HelicalParameter::Slide,
    HelicalParameter::Rise,
    HelicalParameter::Tilt,
    HelicalParameter::Roll,
    HelicalParameter::Twist,
];

#[rustfmt::skip]
static PARAMETER_NAMES: Map<&'static str, HelicalParameter> = phf_map! {
    "shift" => HelicalParameter::Shift, "slide" => HelicalParameter::Slide,
    "rise" => HelicalParameter::Rise, "tilt" => HelicalParameter::Tilt,
    "roll" => HelicalParameter::Roll, "twist" => HelicalParameter::Twist,
    "shear" => HelicalParameter::Shear, "stretch" => HelicalParameter::Stretch,
    "stagger" => HelicalParameter::Stagger, "buckle" => HelicalParameter::Buckle,
    "propel" => HelicalParameter::Propel, "opening" => HelicalParameter::Opening,

    // --- Aliases used by Curves+ output and older scripts ---
    "propeller" => HelicalParameter::Propel,
    "open" => HelicalParameter::Opening,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown helical parameter '{0}'")]
pub struct UnknownParameterError(pub String);

impl HelicalParameter {
    pub const ALL: [HelicalParameter; 12] = [
        HelicalParameter::Shift,
        HelicalParameter::Slide,
        HelicalParameter::Rise,
        HelicalParameter::Tilt,
        HelicalParameter::Roll,
        HelicalParameter::Twist,
        HelicalParameter::Shear,
        HelicalParameter::Stretch,
        HelicalParameter::Stagger,
        HelicalParameter::Buckle,
        HelicalParameter::Propel,
        HelicalParameter::Opening,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HelicalParameter::Shift => "shift",
            HelicalParameter::Slide => "slide",
            HelicalParameter::Rise => "rise",
            HelicalParameter::Tilt => "tilt",
            HelicalParameter::Roll => "roll",
            HelicalParameter::Twist => "twist",
            HelicalParameter::Shear => "shear",
            HelicalParameter::Stretch => "stretch",
            HelicalParameter::Stagger => "stagger",
            HelicalParameter::Buckle => "buckle",
            HelicalParameter::Propel => "propel",
            HelicalParameter::Opening => "opening",
        }
    }

    pub fn kind(&self) -> CoordinateKind {
        match self {
            HelicalParameter::Shift
            | HelicalParameter::Slide
            | HelicalParameter::Rise
            | HelicalParameter::Shear
            | HelicalParameter::Stretch
            | HelicalParameter::Stagger => CoordinateKind::Linear,
            HelicalParameter::Tilt
            | HelicalParameter::Roll
            | HelicalParameter::Twist
            | HelicalParameter::Buckle
            | HelicalParameter::Propel
            | HelicalParameter::Opening => CoordinateKind::Circular,
        }
    }

    pub fn level(&self) -> ParameterLevel {
        match self {
            HelicalParameter::Shift
            | HelicalParameter::Slide
            | HelicalParameter::Rise
            | HelicalParameter::Tilt
            | HelicalParameter::Roll
            | HelicalParameter::Twist => ParameterLevel::BasePairStep,
            _ => ParameterLevel::BasePair,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self.kind() {
            CoordinateKind::Linear => "Angstroms",
            CoordinateKind::Circular => "Degrees",
        }
    }

    /// Position of a step coordinate in [`STEP_COORDINATES`].
    pub fn step_index(&self) -> Option<usize> {
        STEP_COORDINATES.iter().position(|p| p == self)
    }

    /// Finds the first parameter name contained in `text`, e.g. a file stem like `canal_twist`.
    pub fn detect_in(text: &str) -> Option<Self> {
        let lower = text.to_ascii_lowercase();
        Self::ALL.into_iter().find(|p| lower.contains(p.name()))
    }
}

impl fmt::Display for HelicalParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HelicalParameter {
    type Err = UnknownParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        PARAMETER_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| UnknownParameterError(s.to_string()))
    }
}
