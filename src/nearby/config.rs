use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use nearpost::proximity::DEFAULT_RADIUS_KM;

/// File consulted when no --config flag is given.
const DEFAULT_CONFIG_FILE: &str = "nearpost.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GlobalConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_radius")]
    pub default_radius_km: f64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_KM
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Explicit path, else `nearpost.toml` in the working directory, else
    /// built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.global.data_dir, PathBuf::from("data"));
        assert_eq!(config.search.default_radius_km, DEFAULT_RADIUS_KM);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nearpost.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[global]\ndata_dir = \"/srv/snapshots\"").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.global.data_dir, PathBuf::from("/srv/snapshots"));
        assert_eq!(config.search.default_radius_km, DEFAULT_RADIUS_KM);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nearpost.toml");
        fs::write(&path, "global = not toml").unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }
}
