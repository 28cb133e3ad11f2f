//! Menu and options screens
//!
//! Pure navigation state; drawing lives in `renderer::terminal` and key
//! handling in the binary.

use crate::settings::Settings;

/// Entries of the title menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Options,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Start, MenuItem::Options, MenuItem::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Start => "Start game",
            MenuItem::Options => "Options",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Entries of the options screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionItem {
    Difficulty,
    ShowFps,
    Bell,
    Back,
}

impl OptionItem {
    pub const ALL: [OptionItem; 4] = [
        OptionItem::Difficulty,
        OptionItem::ShowFps,
        OptionItem::Bell,
        OptionItem::Back,
    ];

    /// Label including the current value
    pub fn label(&self, settings: &Settings) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" };
        match self {
            OptionItem::Difficulty => format!("Difficulty: {}", settings.difficulty.as_str()),
            OptionItem::ShowFps => format!("Show FPS: {}", on_off(settings.show_fps)),
            OptionItem::Bell => format!("Bell on hit: {}", on_off(settings.bell_on_hit)),
            OptionItem::Back => "Back".to_string(),
        }
    }
}

/// Cursor over a fixed list, wrapping at both ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub index: usize,
}

impl Cursor {
    pub fn up(&mut self, len: usize) {
        self.index = (self.index + len - 1) % len;
    }

    pub fn down(&mut self, len: usize) {
        self.index = (self.index + 1) % len;
    }
}

#[derive(Debug, Clone, Default)]
pub struct MainMenu {
    pub cursor: Cursor,
}

impl MainMenu {
    pub fn up(&mut self) {
        self.cursor.up(MenuItem::ALL.len());
    }

    pub fn down(&mut self) {
        self.cursor.down(MenuItem::ALL.len());
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.cursor.index]
    }
}

#[derive(Debug, Clone, Default)]
pub struct OptionsMenu {
    pub cursor: Cursor,
}

impl OptionsMenu {
    pub fn up(&mut self) {
        self.cursor.up(OptionItem::ALL.len());
    }

    pub fn down(&mut self) {
        self.cursor.down(OptionItem::ALL.len());
    }

    pub fn selected(&self) -> OptionItem {
        OptionItem::ALL[self.cursor.index]
    }

    /// Change the selected setting; returns true when the screen should close
    pub fn activate(&self, settings: &mut Settings) -> bool {
        match self.selected() {
            OptionItem::Difficulty => settings.difficulty = settings.difficulty.next(),
            OptionItem::ShowFps => settings.show_fps = !settings.show_fps,
            OptionItem::Bell => settings.bell_on_hit = !settings.bell_on_hit,
            OptionItem::Back => return true,
        }
        false
    }
}
