use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileBimodalityConfig {
    pub confidence_level: Option<f64>,
    pub max_iterations: Option<usize>,
    pub tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileStiffnessConfig {
    pub kt: Option<f64>,
    pub scaling: Option<[f64; 6]>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileCorrelationConfig {
    pub allow_undefined: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bimodality: Option<FileBimodalityConfig>,
    pub stiffness: Option<FileStiffnessConfig>,
    pub correlation: Option<FileCorrelationConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_section() {
        let config = FileConfig::parse(
            r#"
            [bimodality]
            confidence-level = 1.0
            max-iterations = 200
            tolerance = 1e-6

            [stiffness]
            kt = 0.6
            scaling = [1, 1, 1, 10, 10, 10]

            [correlation]
            allow-undefined = true
            "#,
        )
        .unwrap();

        let bimodality = config.bimodality.unwrap();
        assert_eq!(bimodality.confidence_level, Some(1.0));
        assert_eq!(bimodality.max_iterations, Some(200));
        assert_eq!(bimodality.tolerance, Some(1e-6));
        let stiffness = config.stiffness.unwrap();
        assert_eq!(stiffness.kt, Some(0.6));
        assert_eq!(stiffness.scaling, Some([1.0, 1.0, 1.0, 10.0, 10.0, 10.0]));
        assert_eq!(config.correlation.unwrap().allow_undefined, Some(true));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("[bimodality]\nconfidence = 1.0\n").is_err());
        assert!(FileConfig::parse("[plots]\nformat = \"jpg\"\n").is_err());
    }

    #[test]
    fn scaling_needs_exactly_six_entries() {
        assert!(FileConfig::parse("[stiffness]\nscaling = [1, 2, 3]\n").is_err());
    }

    #[test]
    fn from_file_reports_the_offending_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[bimodality\n").unwrap();
        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
