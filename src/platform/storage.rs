//! On-disk locations for persisted files
//!
//! `$CAT_DISASTER_HOME` wins, then `$HOME/.cat-disaster`, then the current
//! directory.

use std::path::PathBuf;

/// Overrides the data directory
pub const HOME_ENV: &str = "CAT_DISASTER_HOME";

pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        Some(home) => PathBuf::from(home).join(".cat-disaster"),
        None => PathBuf::from("."),
    }
}

pub fn highscore_path() -> PathBuf {
    data_dir().join("highscore.json")
}

pub fn settings_path() -> PathBuf {
    data_dir().join("settings.json")
}

pub fn tuning_path() -> PathBuf {
    data_dir().join("tuning.json")
}

pub fn log_path() -> PathBuf {
    data_dir().join("cat-disaster.log")
}
