//! Data-driven game balance
//!
//! A flat set of named numeric tunables consumed when a session starts.
//! Loaded from `tuning.json` in the data directory; every missing field falls
//! back to its default, and a missing or malformed file means all defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{EDGE_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Distance from the side walls at which cats turn around
    pub edge_margin: f32,

    // === Dog ===
    pub dog_width: f32,
    pub dog_height: f32,
    /// Horizontal pixels per tick
    pub dog_speed: f32,
    /// Minimum time between two barks
    pub fire_cooldown_ms: u64,

    // === Barks ===
    /// Vertical pixels per tick
    pub bark_speed: f32,
    /// Projectile points per bark
    pub bark_points: u32,
    /// Vertical spacing between the points of one bark
    pub bark_spacing: f32,

    // === Cats ===
    pub cat_width: f32,
    pub cat_height: f32,
    /// Pixels a cat drops each time it reaches a side wall
    pub cat_vertical_step: f32,
    pub cat_health: u32,
    /// Global cat speed at session start (pixels per tick)
    pub cat_start_speed: f32,
    /// Ceiling for the global cat speed
    pub cat_max_speed: f32,
    /// Session time between two speed increases
    pub speed_ramp_interval_ms: u64,

    // === Spawning ===
    /// Base ticks between two normal cats
    pub spawn_interval_ticks: u32,
    /// Standard deviation of the spawn jitter (ticks)
    pub spawn_jitter_ticks: f32,
    /// Ticks before the first cat appears
    pub first_spawn_ticks: u32,

    // === Boss ===
    /// Kills needed before the boss shows up
    pub boss_kill_threshold: u32,
    pub boss_health: u32,
    pub boss_speed: f32,
    pub boss_width: f32,
    pub boss_height: f32,

    // === Food ===
    pub food_enabled: bool,
    pub food_x: f32,
    pub food_y: f32,
    pub food_size: f32,
    /// Size multiplier applied to a cat that eats the food
    pub food_scale: f32,
    /// Health multiplier applied to a cat that eats the food
    pub food_health_multiplier: u32,

    // === Session ===
    /// Ticks between the win/lose transition and the end of the session
    pub game_over_delay_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            edge_margin: EDGE_MARGIN,

            dog_width: 48.0,
            dog_height: 40.0,
            dog_speed: 5.0,
            fire_cooldown_ms: 350,

            bark_speed: 10.0,
            bark_points: 3,
            bark_spacing: 12.0,

            cat_width: 40.0,
            cat_height: 40.0,
            cat_vertical_step: 80.0,
            cat_health: 1,
            cat_start_speed: 1.0,
            cat_max_speed: 6.0,
            speed_ramp_interval_ms: 10_000,

            spawn_interval_ticks: 200,
            spawn_jitter_ticks: 60.0,
            first_spawn_ticks: 25,

            boss_kill_threshold: 20,
            boss_health: 20,
            boss_speed: 2.0,
            boss_width: 96.0,
            boss_height: 80.0,

            food_enabled: true,
            food_x: 308.0,
            food_y: 196.0,
            food_size: 24.0,
            food_scale: 1.5,
            food_health_multiplier: 2,

            game_over_delay_ticks: 150,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Tuning>(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning.sanitized()
                }
                Err(err) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::debug!("No tuning file at {} ({}), using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.screen_width.is_nan() || self.screen_width <= 0.0 {
            self.screen_width = defaults.screen_width;
        }
        if self.screen_height.is_nan() || self.screen_height <= 0.0 {
            self.screen_height = defaults.screen_height;
        }
        self.edge_margin = self.edge_margin.max(0.0);
        self.dog_speed = self.dog_speed.max(0.0);
        self.bark_speed = self.bark_speed.max(1.0);
        self.bark_points = self.bark_points.max(1);
        self.cat_health = self.cat_health.max(1);
        self.boss_health = self.boss_health.max(1);
        self.food_health_multiplier = self.food_health_multiplier.max(1);
        self.food_scale = self.food_scale.max(1.0);
        self.cat_start_speed = self.cat_start_speed.max(0.0);
        if self.cat_max_speed < self.cat_start_speed {
            self.cat_max_speed = self.cat_start_speed;
        }
        self.spawn_interval_ticks = self.spawn_interval_ticks.max(1);
        self.spawn_jitter_ticks = self.spawn_jitter_ticks.max(0.0);
        self.speed_ramp_interval_ms = self.speed_ramp_interval_ms.max(1);
        self
    }

    /// Right-most x a cat of the given width may reach before turning
    pub fn right_bound(&self, width: f32) -> f32 {
        self.screen_width - self.edge_margin - width
    }
}
