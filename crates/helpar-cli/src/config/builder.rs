use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::ConfigOverrides;
use crate::error::{CliError, Result};
use helpar::engine::config::{AnalysisConfig, AnalysisConfigBuilder};
use std::str::FromStr;

pub fn build_config(overrides: &ConfigOverrides) -> Result<AnalysisConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &overrides.config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let file_config = apply_set_values(file_config, &overrides.set_values)?;

    let bimodality = file_config.bimodality.unwrap_or_default();
    let stiffness = file_config.stiffness.unwrap_or_default();
    let correlation = file_config.correlation.unwrap_or_default();

    let config = AnalysisConfigBuilder::new()
        .confidence_level(
            overrides
                .confidence_level
                .or(bimodality.confidence_level)
                .unwrap_or(defaults.confidence_level),
        )
        .max_iterations(
            overrides
                .max_iterations
                .or(bimodality.max_iterations)
                .unwrap_or(defaults.max_iterations),
        )
        .tolerance(
            overrides
                .tolerance
                .or(bimodality.tolerance)
                .unwrap_or(defaults.tolerance),
        )
        .kt(overrides.kt.or(stiffness.kt).unwrap_or(defaults.kt))
        .scaling(stiffness.scaling.unwrap_or(defaults.scaling))
        .allow_undefined(
            overrides.allow_undefined
                || correlation
                    .allow_undefined
                    .unwrap_or(defaults.allow_undefined),
        )
        .build()?;

    Ok(config)
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn parse_scaling(key: &str, value: &str) -> Result<[f64; 6]> {
    let entries = value
        .split(',')
        .map(|v| parse_value::<f64>(key, v, "float"))
        .collect::<Result<Vec<_>>>()?;
    <[f64; 6]>::try_from(entries).map_err(|entries| {
        CliError::Config(format!(
            "{} needs 6 comma-separated values, got {}",
            key,
            entries.len()
        ))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key.trim() {
            "bimodality.confidence-level" => {
                config
                    .bimodality
                    .get_or_insert_with(Default::default)
                    .confidence_level = Some(parse_value(key, value_str, "float")?);
            }
            "bimodality.max-iterations" => {
                config
                    .bimodality
                    .get_or_insert_with(Default::default)
                    .max_iterations = Some(parse_value(key, value_str, "integer")?);
            }
            "bimodality.tolerance" => {
                config.bimodality.get_or_insert_with(Default::default).tolerance =
                    Some(parse_value(key, value_str, "float")?);
            }
            "stiffness.kt" => {
                config.stiffness.get_or_insert_with(Default::default).kt =
                    Some(parse_value(key, value_str, "float")?);
            }
            "stiffness.scaling" => {
                config.stiffness.get_or_insert_with(Default::default).scaling =
                    Some(parse_scaling(key, value_str)?);
            }
            "correlation.allow-undefined" => {
                config
                    .correlation
                    .get_or_insert_with(Default::default)
                    .allow_undefined = Some(parse_value(key, value_str, "boolean")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpar::engine::config::{DEFAULT_KT, DEFAULT_SCALING};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("helpar.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let config = build_config(&ConfigOverrides::default()).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let (_dir, path) = write_config(
            r#"
            [bimodality]
            confidence-level = 1.0
            max-iterations = 50

            [stiffness]
            kt = 0.6

            [correlation]
            allow-undefined = true
            "#,
        );
        let overrides = ConfigOverrides {
            config_path: Some(path),
            ..ConfigOverrides::default()
        };
        let config = build_config(&overrides).unwrap();
        assert_eq!(config.bimodality.confidence_level, 1.0);
        assert_eq!(config.bimodality.max_iterations, 50);
        assert_eq!(config.stiffness.kt, 0.6);
        assert_eq!(config.stiffness.scaling, DEFAULT_SCALING);
        assert!(config.correlation.allow_undefined);
    }

    #[test]
    fn cli_flags_override_set_values_and_file() {
        let (_dir, path) = write_config("[bimodality]\nconfidence-level = 1.0\n[stiffness]\nkt = 0.6\n");
        let overrides = ConfigOverrides {
            config_path: Some(path),
            set_values: vec![
                "bimodality.confidence-level=2".to_string(),
                "stiffness.kt=0.7".to_string(),
            ],
            confidence_level: Some(3.0),
            ..ConfigOverrides::default()
        };
        let config = build_config(&overrides).unwrap();
        assert_eq!(config.bimodality.confidence_level, 3.0);
        assert_eq!(config.stiffness.kt, 0.7);
    }

    #[test]
    fn set_values_cover_every_key() {
        let overrides = ConfigOverrides {
            set_values: vec![
                "bimodality.confidence-level=0.5".to_string(),
                "bimodality.max-iterations=10".to_string(),
                "bimodality.tolerance=1e-8".to_string(),
                "stiffness.kt=1.5".to_string(),
                "stiffness.scaling=1,2,3,4,5,6".to_string(),
                "correlation.allow-undefined=true".to_string(),
            ],
            ..ConfigOverrides::default()
        };
        let config = build_config(&overrides).unwrap();
        assert_eq!(config.bimodality.confidence_level, 0.5);
        assert_eq!(config.bimodality.max_iterations, 10);
        assert!((config.bimodality.tolerance - 1e-8).abs() < 1e-20);
        assert_eq!(config.stiffness.kt, 1.5);
        assert_eq!(config.stiffness.scaling, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(config.correlation.allow_undefined);
    }

    #[test]
    fn malformed_set_values_are_config_errors() {
        for bad in [
            "bimodality.tolerance",
            "bimodality.max-iterations=many",
            "stiffness.scaling=1,2,3",
            "plots.format=jpg",
        ] {
            let overrides = ConfigOverrides {
                set_values: vec![bad.to_string()],
                ..ConfigOverrides::default()
            };
            assert!(
                matches!(build_config(&overrides), Err(CliError::Config(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let overrides = ConfigOverrides {
            confidence_level: Some(75.0),
            ..ConfigOverrides::default()
        };
        assert!(matches!(build_config(&overrides), Err(CliError::Config(_))));

        let overrides = ConfigOverrides {
            kt: Some(-DEFAULT_KT),
            ..ConfigOverrides::default()
        };
        assert!(matches!(build_config(&overrides), Err(CliError::Config(_))));
    }

    #[test]
    fn allow_undefined_flag_cannot_be_unset_by_file() {
        let (_dir, path) = write_config("[correlation]\nallow-undefined = false\n");
        let overrides = ConfigOverrides {
            config_path: Some(path),
            allow_undefined: true,
            ..ConfigOverrides::default()
        };
        assert!(build_config(&overrides).unwrap().correlation.allow_undefined);
    }
}
