//! Keyboard state for the terminal frontend
//!
//! Terminals rarely report key releases, so a key counts as held if it was
//! pressed or repeated within the last `hold_window` frames. On terminals
//! that do report releases the key is dropped immediately.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// Default hold window: 8 frames at 50 fps, longer than the OS repeat interval
pub const HOLD_WINDOW: u64 = 8;

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Fire,
    Pause,
    Quit,
    /// Back to the menu from the game-over screen
    Restart,
}

/// Map a key to an action
pub fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Char(' ') | KeyCode::Up => Some(Action::Fire),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        _ => None,
    }
}

/// Tracks which actions are live on the current frame
#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Action -> last frame it was pressed or repeated
    last_seen: HashMap<Action, u64>,
    frame: u64,
    hold_window: u64,
    pause_pending: bool,
    restart_pending: bool,
    quit: bool,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new(HOLD_WINDOW)
    }
}

impl KeyTracker {
    pub fn new(hold_window: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            frame: 0,
            hold_window,
            pause_pending: false,
            restart_pending: false,
            quit: false,
        }
    }

    /// Call once at the top of every frame, before handling events
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn handle(&mut self, event: &KeyEvent) {
        let Some(action) = action_for(event.code, event.modifiers) else {
            return;
        };
        match event.kind {
            KeyEventKind::Press => {
                self.last_seen.insert(action, self.frame);
                match action {
                    Action::Pause => self.pause_pending = true,
                    Action::Restart => self.restart_pending = true,
                    Action::Quit => self.quit = true,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(action, self.frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&action);
            }
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.last_seen
            .get(&action)
            .map(|&last| self.frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Consume a pending restart request
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_pending)
    }

    /// Input for the next simulation tick; the pause toggle fires once
    pub fn tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.is_held(Action::Left),
            right: self.is_held(Action::Right),
            fire: self.is_held(Action::Fire),
            pause: std::mem::take(&mut self.pause_pending),
        }
    }

    /// Forget everything except the frame counter (between sessions)
    pub fn reset(&mut self) {
        self.last_seen.clear();
        self.pause_pending = false;
        self.restart_pending = false;
        self.quit = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_held_keys_expire() {
        let mut keys = KeyTracker::new(2);
        keys.begin_frame();
        keys.handle(&press(KeyCode::Left));
        keys.handle(&press(KeyCode::Char(' ')));
        let input = keys.tick_input();
        assert!(input.left && input.fire && !input.right);

        keys.begin_frame();
        keys.begin_frame();
        assert!(keys.is_held(Action::Left));
        keys.begin_frame();
        assert!(!keys.is_held(Action::Left));
    }

    #[test]
    fn test_release_drops_key() {
        let mut keys = KeyTracker::default();
        keys.begin_frame();
        keys.handle(&press(KeyCode::Right));
        assert!(keys.is_held(Action::Right));
        keys.handle(&KeyEvent::new_with_kind(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(!keys.is_held(Action::Right));
    }

    #[test]
    fn test_pause_is_one_shot() {
        let mut keys = KeyTracker::default();
        keys.begin_frame();
        keys.handle(&press(KeyCode::Char('p')));
        assert!(keys.tick_input().pause);
        assert!(!keys.tick_input().pause);
    }

    #[test]
    fn test_quit_keys() {
        let mut keys = KeyTracker::default();
        keys.handle(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(keys.quit_requested());

        let mut keys = KeyTracker::default();
        keys.handle(&press(KeyCode::Esc));
        assert!(keys.quit_requested());
        keys.reset();
        assert!(!keys.quit_requested());
    }
}
