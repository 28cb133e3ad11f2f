//! Read-only view of a session for renderers
//!
//! Only live things make it into a snapshot: inactive barks and cats are
//! dropped, so a renderer never has to filter.

use glam::Vec2;
use serde::Serialize;

use super::rect::Rect;
use super::state::{GamePhase, GameState, Side};

/// What a sprite should look like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Dog,
    Cat,
    FatCat,
    Boss,
    Food,
}

/// One drawable actor
#[derive(Debug, Clone, Serialize)]
pub struct ActorView {
    pub kind: SpriteKind,
    pub rect: Rect,
    pub facing: Side,
    pub health: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub dog: ActorView,
    pub cats: Vec<ActorView>,
    /// Every point of every active bark
    pub bark_points: Vec<Vec2>,
    pub food: Option<ActorView>,
    pub kills: u32,
    pub cat_speed: f32,
    /// Remaining boss health while the boss is on screen
    pub boss_health: Option<u32>,
    pub phase: GamePhase,
    pub time_ticks: u64,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let cats = self
            .active_cats()
            .map(|cat| ActorView {
                kind: if cat.is_boss() {
                    SpriteKind::Boss
                } else if cat.enlarged {
                    SpriteKind::FatCat
                } else {
                    SpriteKind::Cat
                },
                rect: cat.rect,
                facing: cat.direction,
                health: cat.health,
            })
            .collect();

        let bark_points = self
            .dog
            .active_barks()
            .flat_map(|b| b.points.iter().copied())
            .collect();

        Snapshot {
            width: self.tuning.screen_width,
            height: self.tuning.screen_height,
            dog: ActorView {
                kind: SpriteKind::Dog,
                rect: self.dog.rect,
                facing: self.dog.facing,
                health: 1,
            },
            cats,
            bark_points,
            food: self.food.map(|f| ActorView {
                kind: SpriteKind::Food,
                rect: f.rect,
                facing: Side::Right,
                health: 1,
            }),
            kills: self.dog.kills,
            cat_speed: self.difficulty.cat_speed,
            boss_health: self.boss().map(|b| b.health),
            phase: self.phase,
            time_ticks: self.time_ticks,
        }
    }
}
