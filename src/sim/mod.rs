//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{BarkHit, can_eat, cat_reaches_dog, find_dog_catcher, resolve_bark_hits};
pub use rect::Rect;
pub use snapshot::{ActorView, Snapshot, SpriteKind};
pub use spawner::{next_spawn_delay, ramp_speed};
pub use state::{
    Bark, Cat, CatKind, Difficulty, Dog, Food, GameEvent, GamePhase, GameState, Outcome, Side,
};
pub use tick::{TickInput, tick};
