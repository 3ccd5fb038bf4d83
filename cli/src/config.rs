// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fs, path::PathBuf, str::FromStr};

use gigcal_core::{APP_NAME, Config as CoreConfig};

const GIGCAL_CONFIG_ENV: &str = "GIGCAL_CONFIG";

/// Resolves and parses the configuration file.
///
/// Resolution order: `--config` flag, then the `GIGCAL_CONFIG` environment
/// variable, then `$XDG_CONFIG_HOME/gigcal/config.toml`. An explicitly
/// named file must exist; a missing default file just yields the default
/// configuration, so the calendar works with no setup at all.
pub fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(GIGCAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok(CoreConfig::default());
        }
        config
    };

    fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| a.core)
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_parsed() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[core]
data_dir = "/tmp/gigcal-data"
"#,
        )
        .unwrap();

        let config = parse_config(Some(config_path)).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/gigcal-data")));
    }

    #[test]
    fn test_empty_config_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        let config = parse_config(Some(config_path)).unwrap();
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = parse_config(Some(temp_dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[core\ndata_dir = ").unwrap();

        assert!(parse_config(Some(config_path)).is_err());
    }
}
