use std::{env, path::PathBuf};

use directories::ProjectDirs;

pub const CONFIG_ENV: &str = "SENTIMENT_CONFIG";

pub fn get_config_dir_location() -> Option<PathBuf> {
    let project_dir = ProjectDirs::from("", "", "sentiment")?;
    Some(project_dir.config_dir().to_owned())
}

/// `SENTIMENT_CONFIG` when set, otherwise `config.toml` in the platform config directory.
pub fn get_config_location() -> Option<PathBuf> {
    match env::var(CONFIG_ENV) {
        Ok(val) if !val.is_empty() => Some(PathBuf::from(val)),
        _ => get_config_dir_location().map(|dir| dir.join("config.toml")),
    }
}
