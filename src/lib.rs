//! Cat Disaster - a dog barks at descending cats
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `game`: Fixed-step driver that owns a session and persists the highscore
//! - `renderer`: Terminal rendering of simulation snapshots
//! - `platform`: Input tracking and on-disk storage locations
//! - `tuning`: Data-driven game balance
//! - `ui`: Menu and options navigation

pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::{DifficultyPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 50;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Distance from the side walls at which a cat turns around
    pub const EDGE_MARGIN: f32 = 10.0;
}

/// Convert a timestep in seconds to whole milliseconds
#[inline]
pub fn dt_to_millis(dt: f32) -> u64 {
    (dt.max(0.0) * 1000.0).round() as u64
}
