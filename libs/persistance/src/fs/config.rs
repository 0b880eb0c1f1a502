use std::{fs, io, path::PathBuf};

use log::debug;
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use super::utils::get_config_location;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config at {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config")]
    Parse(#[from] toml::de::Error),
    #[error("smoothing alpha must be a positive number, got {0}")]
    InvalidAlpha(f64),
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct General {
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            log_level: String::from("info"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Classifier {
    pub alpha: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier { alpha: 1.0 }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub classifier: Classifier,
}

pub fn parse_config(raw: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(raw)?;
    let alpha = config.classifier.alpha;
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(ConfigError::InvalidAlpha(alpha));
    }
    Ok(config)
}

/// Reads the config file if there is one. A missing file is not an error and yields the defaults.
pub fn read_config() -> Result<Config, ConfigError> {
    let file = match get_config_location() {
        Some(file) if file.exists() => file,
        _ => {
            debug!("no config file found, using defaults");
            return Ok(Config::default());
        }
    };
    let raw = fs::read_to_string(&file).map_err(|e| ConfigError::Read {
        path: file.clone(),
        source: e,
    })?;
    parse_config(&raw)
}
