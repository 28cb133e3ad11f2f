//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::collision::{can_eat, find_dog_catcher, resolve_bark_hits};
use super::spawner::{update_difficulty, update_spawns};
use super::state::{Bark, GameEvent, GamePhase, GameState, Outcome};
use crate::dt_to_millis;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move the dog left
    pub left: bool,
    /// Move the dog right
    pub right: bool,
    /// Bark (subject to the fire cooldown)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// -1, 0 or 1; opposing keys cancel out
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::Ended(_) => return,
        GamePhase::GameOver {
            outcome,
            ticks_left,
        } => {
            // Simulation is frozen; only the delay runs down
            if ticks_left <= 1 {
                state.phase = GamePhase::Ended(outcome);
                log::info!("Session ended: {:?}", outcome);
            } else {
                state.phase = GamePhase::GameOver {
                    outcome,
                    ticks_left: ticks_left - 1,
                };
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.clock_ms += dt_to_millis(dt);

    // Dog
    let width = state.tuning.screen_width;
    state.dog.step(input.direction(), width);
    if input.fire {
        try_fire(state);
    }

    // Barks finished last tick are dropped before anything moves
    state.dog.barks.retain(|b| b.active);
    for bark in &mut state.dog.barks {
        bark.advance();
    }

    // Bark hits
    for hit in resolve_bark_hits(&mut state.dog.barks, &mut state.cats) {
        if !hit.killed {
            state.events.push(GameEvent::CatHit {
                cat_id: hit.cat_id,
                health_left: hit.health_left,
            });
        } else if hit.is_boss {
            state.dog.boss_defeated = true;
            state.events.push(GameEvent::BossDefeated);
        } else {
            state.dog.kills += 1;
            state.events.push(GameEvent::CatKilled { cat_id: hit.cat_id });
        }
    }
    if state.dog.boss_defeated {
        enter_game_over(state, Outcome::BossDefeated);
        return;
    }

    // Spawning and difficulty
    update_difficulty(state);
    update_spawns(state);

    // Cats
    let speed = state.difficulty.cat_speed;
    for cat in &mut state.cats {
        cat.descend(speed, &state.tuning);
    }

    if let Some(food) = state.food {
        let (scale, multiplier) = (state.tuning.food_scale, state.tuning.food_health_multiplier);
        for cat in &mut state.cats {
            if can_eat(&food, cat) && cat.eat(scale, multiplier) {
                state.events.push(GameEvent::CatEnlarged { cat_id: cat.id });
                log::debug!("Cat {} ate the food (health {})", cat.id, cat.health);
            }
        }
    }

    if let Some(cat_id) = find_dog_catcher(&state.dog.rect, &state.cats) {
        state.events.push(GameEvent::DogCaught { cat_id });
        enter_game_over(state, Outcome::DogCaught);
        return;
    }

    // Cats that fell off the bottom are gone without credit
    let bottom = state.tuning.screen_height;
    for cat in state.cats.iter_mut().filter(|c| c.active) {
        if cat.rect.top() >= bottom {
            cat.active = false;
            state.events.push(GameEvent::CatEscaped { cat_id: cat.id });
        }
    }
    state.cats.retain(|c| c.active);
}

/// Bark if the cooldown allows it
fn try_fire(state: &mut GameState) {
    let now = state.clock_ms;
    if !state.dog.can_fire(now, state.tuning.fire_cooldown_ms) {
        return;
    }
    let id = state.next_entity_id();
    let t = &state.tuning;
    let bark = Bark::new(id, state.dog.muzzle(), t.bark_points, t.bark_spacing, t.bark_speed);
    state.dog.barks.push(bark);
    state.dog.last_fire_ms = Some(now);
    state.events.push(GameEvent::BarkFired { bark_id: id });
}

/// Freeze the session and start the end-of-game delay
fn enter_game_over(state: &mut GameState, outcome: Outcome) {
    let delay = state.tuning.game_over_delay_ticks;
    state.phase = if delay == 0 {
        GamePhase::Ended(outcome)
    } else {
        GamePhase::GameOver {
            outcome,
            ticks_left: delay,
        }
    };
    log::info!(
        "Game over: {:?} with {} kills at tick {} (seed {})",
        outcome,
        state.dog.kills,
        state.time_ticks,
        state.seed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::spawner::spawn_boss;
    use crate::sim::state::{Cat, Side};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// A session with no natural spawns and no food, for scripted scenarios
    fn quiet_state() -> GameState {
        let tuning = Tuning {
            first_spawn_ticks: u32::MAX,
            food_enabled: false,
            ..Default::default()
        };
        GameState::new(12345, tuning)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_fire_cooldown_scenario() {
        let mut state = quiet_state();

        // Tick 1 (clock 20ms): first bark
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.dog.barks.len(), 1);
        assert!(state.events.contains(&GameEvent::BarkFired { bark_id: state.dog.barks[0].id }));

        // Ticks 2..=5 idle, tick 6 (clock 120ms, 100ms later): ignored
        for _ in 0..4 {
            tick(&mut state, &idle(), SIM_DT);
        }
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.clock_ms, 120);
        assert_eq!(state.dog.barks.len(), 1);

        // Still cooling down up to clock 340
        while state.clock_ms < 340 {
            tick(&mut state, &fire(), SIM_DT);
        }
        assert_eq!(state.dog.barks.len(), 1);

        // Clock 360 is 340ms after the first bark; clock 380 is past the cooldown
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.dog.barks.len(), 1);
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.dog.barks.len(), 2);
    }

    #[test]
    fn test_bark_removed_tick_after_leaving_screen() {
        let mut state = quiet_state();
        tick(&mut state, &fire(), SIM_DT);
        let mut ticks = 1;
        while state.dog.barks[0].active {
            tick(&mut state, &idle(), SIM_DT);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert!(state.dog.barks[0].points.iter().all(|p| p.y <= 0.0));
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.dog.barks.is_empty());
    }

    #[test]
    fn test_kill_counts_and_removes_cat() {
        let mut state = quiet_state();
        let tuning = state.tuning.clone();
        let muzzle = state.dog.muzzle();

        // Parked cat straight above the muzzle, well clear of the dog
        let mut cat = Cat::normal(100, muzzle.x - 20.0, &tuning);
        cat.rect.pos.y = muzzle.y - 200.0;
        state.cats.push(cat);
        state.difficulty.cat_speed = 0.0;

        tick(&mut state, &fire(), SIM_DT);
        let mut guard = 0;
        while state.dog.kills == 0 {
            tick(&mut state, &idle(), SIM_DT);
            guard += 1;
            assert!(guard < 50);
        }
        assert!(state.events.contains(&GameEvent::CatKilled { cat_id: 100 }));
        assert!(state.cats.is_empty());
        assert!(!state.dog.barks[0].active);

        // The spent bark is gone one tick later
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.dog.barks.is_empty());
    }

    #[test]
    fn test_boss_defeated_on_twentieth_hit() {
        let mut state = quiet_state();
        spawn_boss(&mut state);
        let boss_id = state.cats[0].id;
        assert_eq!(state.cats[0].health, 20);

        for hit in 1..=20 {
            let center = state.cats[0].rect.center();
            let id = state.next_entity_id();
            let speed = state.tuning.bark_speed;
            // One point that lands on the boss centre after this tick's move
            state
                .dog
                .barks
                .push(Bark::new(id, Vec2::new(center.x, center.y + speed), 1, 0.0, speed));
            tick(&mut state, &idle(), SIM_DT);

            if hit < 20 {
                assert!(state.cats[0].active);
                assert_eq!(state.cats[0].health, 20 - hit);
                assert!(!state.dog.boss_defeated);
                assert!(state.events.contains(&GameEvent::CatHit {
                    cat_id: boss_id,
                    health_left: 20 - hit,
                }));
            } else {
                assert!(!state.cats[0].active);
                assert!(state.dog.boss_defeated);
                assert!(state.events.contains(&GameEvent::BossDefeated));
                assert_eq!(
                    state.phase,
                    GamePhase::GameOver {
                        outcome: Outcome::BossDefeated,
                        ticks_left: state.tuning.game_over_delay_ticks,
                    }
                );
            }
        }
        // The boss does not count as a kill
        assert_eq!(state.dog.kills, 0);
    }

    /// Bark whose points straddle `target` after this tick's move
    fn bark_through(state: &mut GameState, target: Vec2, points: u32) -> Bark {
        let id = state.next_entity_id();
        let t = &state.tuning;
        let head = Vec2::new(target.x, target.y - t.bark_spacing + t.bark_speed);
        Bark::new(id, head, points, t.bark_spacing, t.bark_speed)
    }

    #[test]
    fn test_full_bark_deals_damage_per_point() {
        let mut state = quiet_state();
        spawn_boss(&mut state);
        let boss_id = state.cats[0].id;
        let center = state.cats[0].rect.center();
        let bark = bark_through(&mut state, center, 3);
        state.dog.barks.push(bark);

        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.cats[0].health, 17);
        for left in [19, 18, 17] {
            assert!(state.events.contains(&GameEvent::CatHit {
                cat_id: boss_id,
                health_left: left,
            }));
        }
        assert!(!state.dog.barks[0].active);

        // The spent bark does nothing more
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.cats[0].health, 17);
        assert!(state.dog.barks.is_empty());
    }

    #[test]
    fn test_enlarged_cat_survives_first_hit() {
        let mut state = quiet_state();
        state.difficulty.cat_speed = 0.0;
        let tuning = state.tuning.clone();
        let mut cat = Cat::normal(30, 300.0, &tuning);
        cat.rect.pos.y = 100.0;
        assert!(cat.eat(tuning.food_scale, tuning.food_health_multiplier));
        state.cats.push(cat);
        let center = state.cats[0].rect.center();

        let bark = bark_through(&mut state, center, 1);
        state.dog.barks.push(bark);
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.events.contains(&GameEvent::CatHit { cat_id: 30, health_left: 1 }));
        assert!(state.cats[0].active);
        assert_eq!(state.dog.kills, 0);

        let bark = bark_through(&mut state, center, 1);
        state.dog.barks.push(bark);
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.events.contains(&GameEvent::CatKilled { cat_id: 30 }));
        assert!(state.cats.is_empty());
        assert_eq!(state.dog.kills, 1);
    }

    #[test]
    fn test_enlarged_cat_dies_to_one_full_bark() {
        let mut state = quiet_state();
        state.difficulty.cat_speed = 0.0;
        let tuning = state.tuning.clone();
        let mut cat = Cat::normal(31, 300.0, &tuning);
        cat.rect.pos.y = 100.0;
        cat.eat(tuning.food_scale, tuning.food_health_multiplier);
        state.cats.push(cat);
        let center = state.cats[0].rect.center();

        let bark = bark_through(&mut state, center, 3);
        state.dog.barks.push(bark);
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.events.contains(&GameEvent::CatHit { cat_id: 31, health_left: 1 }));
        assert!(state.events.contains(&GameEvent::CatKilled { cat_id: 31 }));
        assert_eq!(state.dog.kills, 1);
    }

    #[test]
    fn test_left_turn_through_tick() {
        let mut state = quiet_state();
        let tuning = state.tuning.clone();
        let mut cat = Cat::normal(50, 10.5, &tuning);
        cat.rect.pos.y = 40.0;
        state.cats.push(cat);

        // Speed 1: 10.5 - 1 <= 10
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.cats[0].direction, Side::Right);
        assert_eq!(state.cats[0].rect.pos.y, 40.0 + tuning.cat_vertical_step);
        assert_eq!(state.cats[0].rect.pos.x, 10.5);
    }

    #[test]
    fn test_dog_caught_freezes_then_ends() {
        let mut state = quiet_state();
        state.tuning.game_over_delay_ticks = 3;
        let tuning = state.tuning.clone();
        let dog_x = state.dog.rect.pos.x;
        let mut cat = Cat::normal(9, dog_x, &tuning);
        cat.rect.pos.y = state.dog.rect.top() - 40.0;
        state.cats.push(cat);

        tick(&mut state, &idle(), SIM_DT);
        assert!(state.events.contains(&GameEvent::DogCaught { cat_id: 9 }));
        assert!(state.is_over());

        // Frozen: no movement, no firing, no clock
        let clock = state.clock_ms;
        let dog_pos = state.dog.rect.pos;
        let cat_pos = state.cats[0].rect.pos;
        let input = TickInput {
            left: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.clock_ms, clock);
        assert_eq!(state.dog.rect.pos, dog_pos);
        assert_eq!(state.cats[0].rect.pos, cat_pos);
        assert!(state.dog.barks.is_empty());
        assert!(matches!(state.phase, GamePhase::GameOver { ticks_left: 1, .. }));

        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Ended(Outcome::DogCaught));
    }

    #[test]
    fn test_cat_escapes_bottom() {
        let mut state = quiet_state();
        let tuning = state.tuning.clone();
        // Far from the dog horizontally, about to drop below the screen
        let mut cat = Cat::normal(5, 10.5, &tuning);
        cat.rect.pos.y = 420.0;
        state.dog.rect.pos.x = 500.0;
        state.cats.push(cat);

        tick(&mut state, &idle(), SIM_DT);
        assert!(state.events.contains(&GameEvent::CatEscaped { cat_id: 5 }));
        assert!(state.cats.is_empty());
        assert_eq!(state.dog.kills, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_food_enlarges_once() {
        let mut state = GameState::new(1, Tuning {
            first_spawn_ticks: u32::MAX,
            ..Default::default()
        });
        let tuning = state.tuning.clone();
        let food = state.food.unwrap();
        let mut cat = Cat::normal(8, food.rect.left() + 10.0, &tuning);
        cat.rect.pos.y = food.rect.top() - 10.0;
        state.cats.push(cat);

        tick(&mut state, &idle(), SIM_DT);
        assert!(state.events.contains(&GameEvent::CatEnlarged { cat_id: 8 }));
        assert!(state.cats[0].enlarged);
        assert_eq!(state.cats[0].health, 2);

        tick(&mut state, &idle(), SIM_DT);
        assert!(!state.events.contains(&GameEvent::CatEnlarged { cat_id: 8 }));
        assert_eq!(state.cats[0].health, 2);
    }

    #[test]
    fn test_pause() {
        let mut state = quiet_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.time_ticks, 0);

        // Unpausing also runs the tick
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        let inputs = [
            TickInput {
                left: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.cats.len(), state2.cats.len());
        assert_eq!(state1.dog.kills, state2.dog.kills);
        for (a, b) in state1.cats.iter().zip(&state2.cats) {
            assert_eq!(a.rect, b.rect);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
        ) {
            let tuning = Tuning {
                speed_ramp_interval_ms: 500,
                spawn_interval_ticks: 20,
                spawn_jitter_ticks: 6.0,
                boss_kill_threshold: 2,
                ..Default::default()
            };
            let max = tuning.cat_max_speed;
            let mut state = GameState::new(seed, tuning);
            let mut last_speed = state.difficulty.cat_speed;

            for (left, right, fire) in inputs {
                let input = TickInput { left, right, fire, pause: false };
                state.advance_wall_clock(20);
                tick(&mut state, &input, SIM_DT);

                let speed = state.difficulty.cat_speed;
                prop_assert!(speed >= last_speed);
                prop_assert!(speed <= max);
                last_speed = speed;

                prop_assert!(state.cats.iter().filter(|c| c.active && c.is_boss()).count() <= 1);
                for cat in state.active_cats() {
                    prop_assert!(cat.health > 0);
                }
                prop_assert!(state.dog.rect.left() >= 0.0);
                prop_assert!(state.dog.rect.right() <= state.tuning.screen_width);
            }
        }
    }
}
