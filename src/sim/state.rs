//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`], owned by the loop and
//! mutated in place once per tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The boss's health reached zero
    BossDefeated,
    /// A cat reached the dog
    DogCaught,
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Simulation frozen, counting down before the session ends
    GameOver { outcome: Outcome, ticks_left: u32 },
    /// Session over
    Ended(Outcome),
}

impl GamePhase {
    pub fn outcome(&self) -> Option<Outcome> {
        match *self {
            GamePhase::GameOver { outcome, .. } | GamePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Horizontal direction, used for cat sweeps and the dog's facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A burst of projectile points fired together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bark {
    pub id: u32,
    /// Points, head first
    pub points: Vec<Vec2>,
    /// Upward pixels per tick, shared by every point
    pub speed: f32,
    pub active: bool,
}

impl Bark {
    /// Points are stacked downward from `origin` at `spacing` intervals
    pub fn new(id: u32, origin: Vec2, count: u32, spacing: f32, speed: f32) -> Self {
        let points = (0..count)
            .map(|i| Vec2::new(origin.x, origin.y + i as f32 * spacing))
            .collect();
        Self {
            id,
            points,
            speed,
            active: true,
        }
    }

    /// Move every point up; deactivate once all of them left the top edge
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }
        for p in &mut self.points {
            p.y -= self.speed;
        }
        if self.points.iter().all(|p| p.y <= 0.0) {
            self.active = false;
        }
    }
}

/// The player's dog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dog {
    pub rect: Rect,
    /// Horizontal pixels per tick
    pub speed: f32,
    pub facing: Side,
    /// Session clock (ms) of the last bark
    pub last_fire_ms: Option<u64>,
    pub barks: Vec<Bark>,
    /// Normal cats killed this session
    pub kills: u32,
    pub boss_defeated: bool,
}

impl Dog {
    /// Dog centred at the bottom of the playfield
    pub fn new(tuning: &Tuning) -> Self {
        let x = (tuning.screen_width - tuning.dog_width) / 2.0;
        let y = tuning.screen_height - tuning.dog_height;
        Self {
            rect: Rect::new(x, y, tuning.dog_width, tuning.dog_height),
            speed: tuning.dog_speed,
            facing: Side::Right,
            last_fire_ms: None,
            barks: Vec::new(),
            kills: 0,
            boss_defeated: false,
        }
    }

    /// Move by `direction × speed` (direction is -1, 0 or 1), staying on screen
    pub fn step(&mut self, direction: f32, screen_width: f32) {
        if direction == 0.0 {
            return;
        }
        self.facing = if direction < 0.0 { Side::Left } else { Side::Right };
        let max_x = (screen_width - self.rect.size.x).max(0.0);
        self.rect.pos.x = (self.rect.pos.x + direction * self.speed).clamp(0.0, max_x);
    }

    /// Whether the fire cooldown has elapsed at session time `now_ms`
    pub fn can_fire(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        match self.last_fire_ms {
            Some(last) => now_ms.saturating_sub(last) >= cooldown_ms,
            None => true,
        }
    }

    /// Where new barks start: the middle of the dog's top edge
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.rect.center().x, self.rect.top())
    }

    pub fn active_barks(&self) -> impl Iterator<Item = &Bark> {
        self.barks.iter().filter(|b| b.active)
    }
}

/// Kind-specific data for cats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CatKind {
    /// Sweeps at the session's global cat speed
    Normal,
    /// Sweeps at its own fixed speed
    Boss { speed: f32 },
}

/// A descending cat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cat {
    pub id: u32,
    pub kind: CatKind,
    pub rect: Rect,
    pub direction: Side,
    /// Pixels dropped at each wall
    pub vertical_step: f32,
    pub active: bool,
    /// Has eaten the food
    pub enlarged: bool,
    pub health: u32,
}

impl Cat {
    pub fn normal(id: u32, x: f32, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: CatKind::Normal,
            rect: Rect::new(x, 0.0, tuning.cat_width, tuning.cat_height),
            direction: Side::Left,
            vertical_step: tuning.cat_vertical_step,
            active: true,
            enlarged: false,
            health: tuning.cat_health,
        }
    }

    /// The boss always enters at the top centre
    pub fn boss(id: u32, tuning: &Tuning) -> Self {
        let x = (tuning.screen_width - tuning.boss_width) / 2.0;
        Self {
            id,
            kind: CatKind::Boss {
                speed: tuning.boss_speed,
            },
            rect: Rect::new(x, 0.0, tuning.boss_width, tuning.boss_height),
            direction: Side::Left,
            vertical_step: tuning.cat_vertical_step,
            active: true,
            enlarged: false,
            health: tuning.boss_health,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, CatKind::Boss { .. })
    }

    /// Horizontal pixels per tick given the session's global cat speed
    pub fn sweep_speed(&self, global_speed: f32) -> f32 {
        match self.kind {
            CatKind::Normal => global_speed,
            CatKind::Boss { speed } => speed,
        }
    }

    /// One tick of the zig-zag descent
    ///
    /// Moves horizontally while the next step stays inside the margins,
    /// otherwise drops by `vertical_step` and reverses.
    pub fn descend(&mut self, global_speed: f32, tuning: &Tuning) {
        if !self.active {
            return;
        }
        let v = self.sweep_speed(global_speed);
        let x = self.rect.pos.x;
        match self.direction {
            Side::Left => {
                if x - v > tuning.edge_margin {
                    self.rect.pos.x -= v;
                } else {
                    self.rect.pos.y += self.vertical_step;
                    self.direction = Side::Right;
                }
            }
            Side::Right => {
                if x + v < tuning.right_bound(self.rect.size.x) {
                    self.rect.pos.x += v;
                } else {
                    self.rect.pos.y += self.vertical_step;
                    self.direction = Side::Left;
                }
            }
        }
    }

    /// Apply one point of damage; returns true if this hit finished the cat
    pub fn take_hit(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Grow after eating; only the first meal counts
    pub fn eat(&mut self, scale: f32, health_multiplier: u32) -> bool {
        if self.enlarged || !self.active {
            return false;
        }
        self.enlarged = true;
        self.rect = self.rect.scaled(scale);
        self.health = self.health.saturating_mul(health_multiplier).max(1);
        true
    }
}

/// Static food pickup
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Food {
    pub rect: Rect,
}

/// Spawn pacing and the global cat speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difficulty {
    /// Global cat speed (pixels per tick), never above the tuning max
    pub cat_speed: f32,
    /// Wall clock (ms) of the last speed increase
    pub last_ramp_ms: u64,
    /// Ticks until the next normal cat
    pub spawn_timer: u32,
}

/// Things that happened during a tick, for the frontend and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BarkFired { bark_id: u32 },
    CatHit { cat_id: u32, health_left: u32 },
    CatKilled { cat_id: u32 },
    CatEnlarged { cat_id: u32 },
    CatEscaped { cat_id: u32 },
    CatSpawned { cat_id: u32 },
    BossSpawned { cat_id: u32 },
    BossDefeated,
    DogCaught { cat_id: u32 },
    SpeedIncreased { speed: f32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (only advances while playing)
    pub time_ticks: u64,
    /// Session clock in milliseconds (only advances while playing)
    pub clock_ms: u64,
    /// Real time spent playing (ms), supplied by the driver; paces the speed ramp
    pub wall_ms: u64,
    pub dog: Dog,
    /// Cats in spawn order
    pub cats: Vec<Cat>,
    pub food: Option<Food>,
    pub difficulty: Difficulty,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let food = tuning.food_enabled.then(|| Food {
            rect: Rect::new(tuning.food_x, tuning.food_y, tuning.food_size, tuning.food_size),
        });
        let difficulty = Difficulty {
            cat_speed: tuning.cat_start_speed.min(tuning.cat_max_speed),
            last_ramp_ms: 0,
            spawn_timer: tuning.first_spawn_ticks,
        };

        log::info!("New session (seed {})", seed);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            dog: Dog::new(&tuning),
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            clock_ms: 0,
            wall_ms: 0,
            cats: Vec::new(),
            food,
            difficulty,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Credit real elapsed time to the session; ignored unless playing
    pub fn advance_wall_clock(&mut self, ms: u64) {
        if self.phase == GamePhase::Playing {
            self.wall_ms += ms;
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// At most one boss can be active at a time
    pub fn boss_active(&self) -> bool {
        self.cats.iter().any(|c| c.active && c.is_boss())
    }

    pub fn boss(&self) -> Option<&Cat> {
        self.cats.iter().find(|c| c.active && c.is_boss())
    }

    pub fn active_cats(&self) -> impl Iterator<Item = &Cat> {
        self.cats.iter().filter(|c| c.active)
    }

    /// Score shown to the player and compared with the highscore
    pub fn kills(&self) -> u32 {
        self.dog.kills
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. } | GamePhase::Ended(_))
    }
}
