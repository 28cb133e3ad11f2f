//! Highscore persistence
//!
//! A single record `{"highscore": <kills>}` stored as JSON in the data
//! directory. Loading never fails: a missing, unreadable or malformed file
//! reads as 0. Saving is best-effort.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Best kill count across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub highscore: u32,
}

impl HighScore {
    pub fn new(highscore: u32) -> Self {
        Self { highscore }
    }

    /// Whether `kills` would set a new record
    pub fn beaten_by(&self, kills: u32) -> bool {
        kills > self.highscore
    }

    /// Raise the record to `kills` if it is higher; returns true if it changed
    pub fn record(&mut self, kills: u32) -> bool {
        if self.beaten_by(kills) {
            self.highscore = kills;
            true
        } else {
            false
        }
    }

    /// Load from the default location
    pub fn load() -> Self {
        Self::load_from(&storage::highscore_path())
    }

    /// Load from a file, substituting 0 on any failure
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::debug!("No highscore at {} ({})", path.display(), err);
                return Self::default();
            }
        };

        match serde_json::from_str::<HighScore>(&json) {
            Ok(score) => {
                log::info!("Loaded highscore {}", score.highscore);
                score
            }
            Err(err) => {
                log::warn!("Ignoring corrupt highscore file {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Write to a file; failures are logged and otherwise ignored
    pub fn save_to(&self, path: &Path) {
        if let Some(dir) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(dir) {
                log::warn!("Cannot create {}: {}", dir.display(), err);
                return;
            }
        }
        match serde_json::to_string(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Highscore {} saved", self.highscore),
                Err(err) => log::warn!("Failed to save highscore to {}: {}", path.display(), err),
            },
            Err(err) => log::warn!("Failed to encode highscore: {}", err),
        }
    }
}
