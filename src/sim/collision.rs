//! Collision detection between barks, cats, the dog and the food
//!
//! Everything here is axis-aligned: bark points against cat boxes, and the
//! dog's box against cats that have descended to its level.

use super::rect::Rect;
use super::state::{Bark, Cat, Food};

/// A bark point that landed on a cat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarkHit {
    pub bark_id: u32,
    pub cat_id: u32,
    pub is_boss: bool,
    /// This hit brought the cat's health to zero
    pub killed: bool,
    pub health_left: u32,
}

/// Test every active bark point against every active cat
///
/// Each point damages at most the first cat it lands in. The first hit
/// deactivates the bark, but its remaining points still finish this tick,
/// so a bark buried in a big cat can deal one damage per point.
pub fn resolve_bark_hits(barks: &mut [Bark], cats: &mut [Cat]) -> Vec<BarkHit> {
    let mut hits = Vec::new();

    for bark in barks.iter_mut().filter(|b| b.active) {
        for point in &bark.points {
            for cat in cats.iter_mut().filter(|c| c.active) {
                if cat.rect.contains_point(*point) {
                    let killed = cat.take_hit();
                    hits.push(BarkHit {
                        bark_id: bark.id,
                        cat_id: cat.id,
                        is_boss: cat.is_boss(),
                        killed,
                        health_left: cat.health,
                    });
                    bark.active = false;
                    break;
                }
            }
        }
    }

    hits
}

/// Whether a cat has descended to the dog's level and overlaps it
///
/// "At the dog's level" is relaxed by one vertical step so a cat that
/// drops past the dog's top edge in a single move still counts.
pub fn cat_reaches_dog(dog: &Rect, cat: &Cat) -> bool {
    cat.active && cat.rect.top() >= dog.top() - cat.vertical_step && cat.rect.overlaps_x(dog)
}

/// First active cat that caught the dog, if any
pub fn find_dog_catcher(dog: &Rect, cats: &[Cat]) -> Option<u32> {
    cats.iter().find(|c| cat_reaches_dog(dog, c)).map(|c| c.id)
}

/// Whether a cat is touching the food and may still eat it
pub fn can_eat(food: &Food, cat: &Cat) -> bool {
    cat.active && !cat.enlarged && !cat.is_boss() && food.rect.overlaps(&cat.rect)
}
