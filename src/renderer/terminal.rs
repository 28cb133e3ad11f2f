//! crossterm drawing of snapshots and menus
//!
//! Every function queues commands on a writer and flushes once at the end.
//! No game logic happens here.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::Viewport;
use crate::settings::Settings;
use crate::sim::{ActorView, GamePhase, Outcome, Snapshot, SpriteKind};
use crate::ui::{MainMenu, MenuItem, OptionItem, OptionsMenu};

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_BARK: Color = Color::Yellow;
const C_TITLE: Color = Color::Cyan;

/// Rows used by the HUD above the playfield
pub const HUD_ROWS: u16 = 1;

/// Extra HUD values that do not come from the simulation
#[derive(Debug, Clone, Default)]
pub struct HudInfo {
    pub highscore: u32,
    pub fps: Option<u32>,
    pub difficulty: &'static str,
}

fn sprite_style(kind: SpriteKind) -> (char, Color) {
    match kind {
        SpriteKind::Dog => ('D', Color::White),
        SpriteKind::Cat => ('c', Color::Green),
        SpriteKind::FatCat => ('C', Color::Magenta),
        SpriteKind::Boss => ('B', Color::Red),
        SpriteKind::Food => ('%', Color::DarkYellow),
    }
}

/// Render one complete game frame
pub fn render_frame<W: Write>(out: &mut W, snap: &Snapshot, hud: &HudInfo) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let vp = Viewport::fit(cols, rows, glam::Vec2::new(snap.width, snap.height), HUD_ROWS);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, &vp)?;
    draw_hud(out, snap, hud)?;

    if let Some(food) = &snap.food {
        draw_actor(out, &vp, food)?;
    }
    for cat in &snap.cats {
        draw_actor(out, &vp, cat)?;
    }
    draw_actor(out, &vp, &snap.dog)?;

    out.queue(style::SetForegroundColor(C_BARK))?;
    for p in &snap.bark_points {
        if let Some((c, r)) = vp.to_cell(*p) {
            out.queue(cursor::MoveTo(c, r))?;
            out.queue(Print('|'))?;
        }
    }

    match snap.phase {
        GamePhase::Paused => draw_banner(out, &vp, "PAUSED", "P to resume", Color::Yellow)?,
        GamePhase::GameOver { outcome, .. } | GamePhase::Ended(outcome) => {
            let (title, color) = match outcome {
                Outcome::BossDefeated => ("THE BOSS CAT IS DOWN!", Color::Green),
                Outcome::DogCaught => ("THE CATS GOT YOU", Color::Red),
            };
            draw_banner(out, &vp, title, "R for menu   Q to quit", color)?;
        }
        GamePhase::Playing => {}
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()
}

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(vp.col - 1, vp.row - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
    for r in 0..vp.rows {
        out.queue(cursor::MoveTo(vp.col - 1, vp.row + r))?;
        out.queue(Print('│'))?;
        out.queue(cursor::MoveTo(vp.col + vp.cols, vp.row + r))?;
        out.queue(Print('│'))?;
    }
    out.queue(cursor::MoveTo(vp.col - 1, vp.row + vp.rows))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, hud: &HudInfo) -> std::io::Result<()> {
    let mut line = format!(
        " Kills: {}   Best: {}   Cat speed: {:.1}   [{}]",
        snap.kills, hud.highscore, snap.cat_speed, hud.difficulty
    );
    if let Some(health) = snap.boss_health {
        line.push_str(&format!("   BOSS: {}", "♥".repeat(health as usize)));
    }
    if let Some(fps) = hud.fps {
        line.push_str(&format!("   {} fps", fps));
    }
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(line))?;
    Ok(())
}

fn draw_actor<W: Write>(out: &mut W, vp: &Viewport, actor: &ActorView) -> std::io::Result<()> {
    let Some((col, row, w, h)) = vp.rect_cells(&actor.rect) else {
        return Ok(());
    };
    let (glyph, color) = sprite_style(actor.kind);
    let line: String = std::iter::repeat_n(glyph, w as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for r in 0..h {
        out.queue(cursor::MoveTo(col, row + r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    vp: &Viewport,
    title: &str,
    hint: &str,
    color: Color,
) -> std::io::Result<()> {
    let cx = vp.col + vp.cols / 2;
    let cy = vp.row + vp.rows / 2;
    out.queue(cursor::MoveTo(cx.saturating_sub(title.chars().count() as u16 / 2), cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(title))?;
    out.queue(cursor::MoveTo(cx.saturating_sub(hint.chars().count() as u16 / 2), cy + 2))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

/// Title screen
pub fn render_menu<W: Write>(out: &mut W, menu: &MainMenu, highscore: u32) -> std::io::Result<()> {
    let labels: Vec<String> = MenuItem::ALL.iter().map(|i| i.label().to_string()).collect();
    let best = format!("Best: {} cats", highscore);
    render_list(
        out,
        "MORTY & RICK: CAT DISASTER",
        Some(&best),
        &labels,
        menu.cursor.index,
        "↑ ↓ : Choose   ENTER : Select   Q : Quit",
    )
}

/// Options screen
pub fn render_options<W: Write>(
    out: &mut W,
    menu: &OptionsMenu,
    settings: &Settings,
) -> std::io::Result<()> {
    let labels: Vec<String> = OptionItem::ALL.iter().map(|i| i.label(settings)).collect();
    render_list(
        out,
        "OPTIONS",
        None,
        &labels,
        menu.cursor.index,
        "↑ ↓ : Choose   ENTER : Change   ESC : Back",
    )
}

fn render_list<W: Write>(
    out: &mut W,
    title: &str,
    subtitle: Option<&str>,
    labels: &[String],
    selected: usize,
    hint: &str,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let cx = cols / 2;
    let top = (rows / 2).saturating_sub(labels.len() as u16 + 3);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(cx.saturating_sub(title.chars().count() as u16 / 2), top))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    if let Some(sub) = subtitle {
        out.queue(cursor::MoveTo(cx.saturating_sub(sub.chars().count() as u16 / 2), top + 1))?;
        out.queue(style::SetForegroundColor(C_HUD))?;
        out.queue(Print(sub))?;
    }

    for (i, label) in labels.iter().enumerate() {
        let text = if i == selected {
            format!("> {} <", label)
        } else {
            format!("  {}  ", label)
        };
        let color = if i == selected { Color::White } else { C_HINT };
        out.queue(cursor::MoveTo(
            cx.saturating_sub(text.chars().count() as u16 / 2),
            top + 3 + i as u16,
        ))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }

    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        top + 4 + labels.len() as u16,
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    out.queue(style::ResetColor)?;
    out.flush()
}
