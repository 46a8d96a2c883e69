// src/config.rs

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::error::ConfigError;
use crate::fetch::tabla_url;

/// Table 24900: household expenditure by quintile (Encuesta de Presupuestos Familiares).
pub const DEFAULT_TABLE_ID: u32 = 24900;
pub const DEFAULT_OUTPUT_PATH: &str = "datos_ine_tabla_24900_legible.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_SOURCE_URL: &str = "INE_SOURCE_URL";
pub const ENV_OUTPUT_PATH: &str = "INE_OUTPUT_PATH";
pub const ENV_VALIDATE_YEAR: &str = "INE_VALIDATE_YEAR";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Endpoint queried with a single GET.
    pub source_url: String,
    /// Destination CSV file.
    pub output_path: PathBuf,
    pub timeout_secs: u64,
    /// Year for the vertical-percentage check; skipped when unset.
    pub validate_year: Option<i32>,
    pub print_summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: tabla_url(DEFAULT_TABLE_ID),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            validate_year: None,
            print_summary: true,
        }
    }
}

impl Config {
    /// Load from an optional YAML file, apply `INE_*` environment overrides, validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        let cfg = base.with_overrides(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document means "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Apply overrides from `lookup` (the process environment in production).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SOURCE_URL) {
            self.source_url = url;
        }
        if let Some(path) = lookup(ENV_OUTPUT_PATH) {
            self.output_path = PathBuf::from(path);
        }
        if let Some(year) = lookup(ENV_VALIDATE_YEAR) {
            let parsed = year
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_VALIDATE_YEAR,
                    value: year.clone(),
                })?;
            self.validate_year = Some(parsed);
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.source_url).map_err(|_| ConfigError::InvalidValue {
            key: "source_url",
            value: self.source_url.clone(),
        })?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs",
                value: self.timeout_secs.to_string(),
            });
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output_path",
                value: String::new(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
