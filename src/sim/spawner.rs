//! Cat spawning and difficulty ramp
//!
//! Normal cats arrive on a countdown with normally distributed jitter. Once
//! enough cats are killed the boss arrives and normal spawning pauses until
//! it is gone. Independently, the global cat speed grows by `ln(speed + 1)`
//! every ramp interval of real play time, up to the tuning maximum. The ramp
//! reads the wall clock, not the tick count, so dropped frames do not slow it.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::state::{Cat, GameEvent, GameState};
use crate::tuning::Tuning;

/// Next global cat speed: diminishing increments, never above `max`
pub fn ramp_speed(speed: f32, max: f32) -> f32 {
    (speed + (speed + 1.0).ln()).min(max)
}

/// Ticks until the next normal cat: base interval plus N(0, jitter), at least 1
pub fn next_spawn_delay<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> u32 {
    let jitter = match Normal::new(0.0_f32, tuning.spawn_jitter_ticks) {
        Ok(normal) => normal.sample(rng),
        Err(_) => 0.0,
    };
    (tuning.spawn_interval_ticks as f32 + jitter).round().max(1.0) as u32
}

/// Random x along the top edge that keeps the cat inside the side margins
pub fn spawn_x<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> f32 {
    let lo = tuning.edge_margin;
    let hi = tuning.right_bound(tuning.cat_width);
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Raise the global cat speed for every ramp interval that has elapsed
pub fn update_difficulty(state: &mut GameState) {
    let interval = state.tuning.speed_ramp_interval_ms.max(1);
    while state.wall_ms.saturating_sub(state.difficulty.last_ramp_ms) >= interval {
        state.difficulty.last_ramp_ms += interval;

        let old = state.difficulty.cat_speed;
        let new = ramp_speed(old, state.tuning.cat_max_speed);
        if new > old {
            state.difficulty.cat_speed = new;
            state.events.push(GameEvent::SpeedIncreased { speed: new });
            log::debug!("Cat speed {:.2} -> {:.2}", old, new);
        }
    }
}

/// Run the spawn state machine for one tick
pub fn update_spawns(state: &mut GameState) {
    if state.boss_active() {
        // Normal spawning waits for the boss
        return;
    }

    if state.dog.kills >= state.tuning.boss_kill_threshold && !state.dog.boss_defeated {
        spawn_boss(state);
        return;
    }

    state.difficulty.spawn_timer = state.difficulty.spawn_timer.saturating_sub(1);
    if state.difficulty.spawn_timer == 0 {
        spawn_cat(state);
        state.difficulty.spawn_timer = next_spawn_delay(&mut state.rng, &state.tuning);
    }
}

/// Add a normal cat at a random spot on the top edge
pub fn spawn_cat(state: &mut GameState) {
    let id = state.next_entity_id();
    let x = spawn_x(&mut state.rng, &state.tuning);
    state.cats.push(Cat::normal(id, x, &state.tuning));
    state.events.push(GameEvent::CatSpawned { cat_id: id });
    log::debug!("Spawned cat {} at x={:.0}", id, x);
}

/// Add the boss unless one is already active
pub fn spawn_boss(state: &mut GameState) {
    if state.boss_active() {
        return;
    }
    let id = state.next_entity_id();
    state.cats.push(Cat::boss(id, &state.tuning));
    state.events.push(GameEvent::BossSpawned { cat_id: id });
    log::info!("Boss cat {} arrived after {} kills", id, state.dog.kills);
}
