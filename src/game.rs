//! Session driver
//!
//! Owns one [`GameState`], feeds it fixed timesteps from a variable frame
//! time, and persists the highscore the moment a session is won or lost
//! rather than when the frontend gets around to closing it.

use std::path::PathBuf;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::dt_to_millis;
use crate::highscores::HighScore;
use crate::sim::{GameEvent, GamePhase, GameState, Outcome, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// A running session plus the highscore it competes against
pub struct Game {
    pub state: GameState,
    /// Input applied to every tick until replaced
    pub input: TickInput,
    accumulator: f32,
    highscore: HighScore,
    highscore_path: PathBuf,
    last_phase: GamePhase,
    /// Events from every tick run by the last `update`
    events: Vec<GameEvent>,
}

impl Game {
    /// Start a session; the current highscore is read from `highscore_path`
    pub fn new(seed: u64, tuning: Tuning, highscore_path: PathBuf) -> Self {
        let highscore = HighScore::load_from(&highscore_path);
        let state = GameState::new(seed, tuning);
        Self {
            last_phase: state.phase,
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            highscore,
            highscore_path,
            events: Vec::new(),
        }
    }

    /// Run as many fixed ticks as `dt` seconds of frame time cover
    ///
    /// Returns the number of ticks run. Backlog beyond `MAX_SUBSTEPS` is
    /// dropped instead of replayed; the wall clock still gets all of `dt`.
    pub fn update(&mut self, dt: f32) -> u32 {
        self.events.clear();
        self.state.advance_wall_clock(dt_to_millis(dt));
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.run_tick();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Run exactly one tick
    pub fn step(&mut self) {
        self.events.clear();
        self.state.advance_wall_clock(dt_to_millis(SIM_DT));
        self.run_tick();
    }

    fn run_tick(&mut self) {
        tick(&mut self.state, &self.input, SIM_DT);
        self.events.extend_from_slice(&self.state.events);

        // One-shot inputs are consumed by the first tick that sees them
        self.input.pause = false;

        let phase = self.state.phase;
        if phase != self.last_phase {
            if self.last_phase.outcome().is_none() {
                if let Some(outcome) = phase.outcome() {
                    self.on_session_decided(outcome);
                }
            }
            self.last_phase = phase;
        }
    }

    /// Persist a new record at the win/lose transition
    fn on_session_decided(&mut self, outcome: Outcome) {
        let kills = self.state.kills();
        if self.highscore.record(kills) {
            log::info!("New highscore {} ({:?})", kills, outcome);
            self.highscore.save_to(&self.highscore_path);
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn highscore(&self) -> u32 {
        self.highscore.highscore
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// The post-game delay has run out
    pub fn is_finished(&self) -> bool {
        matches!(self.state.phase, GamePhase::Ended(_))
    }
}
