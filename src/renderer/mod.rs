//! Terminal rendering module
//!
//! The playfield is drawn in playfield pixels and squeezed onto the
//! terminal's character grid through a [`Viewport`].

pub mod terminal;

use glam::Vec2;

use crate::sim::Rect;

/// Mapping from playfield pixels to terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Column of the left-most playfield cell
    pub col: u16,
    /// Row of the top-most playfield cell
    pub row: u16,
    /// Playfield size in cells
    pub cols: u16,
    pub rows: u16,
    /// Playfield size in pixels
    pub field: Vec2,
}

impl Viewport {
    /// Fit the playfield inside a bordered box below `hud_rows` lines of HUD
    pub fn fit(term_cols: u16, term_rows: u16, field: Vec2, hud_rows: u16) -> Self {
        Self {
            col: 1,
            row: hud_rows + 1,
            cols: term_cols.saturating_sub(2).max(1),
            rows: term_rows.saturating_sub(hud_rows + 2).max(1),
            field,
        }
    }

    /// Cell for a playfield point, or None when it is off the field
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.field.x || p.y >= self.field.y {
            return None;
        }
        let cx = (p.x / self.field.x * self.cols as f32) as u16;
        let cy = (p.y / self.field.y * self.rows as f32) as u16;
        Some((
            self.col + cx.min(self.cols - 1),
            self.row + cy.min(self.rows - 1),
        ))
    }

    /// Cells covered by a rectangle, clipped to the field
    ///
    /// Returns `(col, row, width, height)`; anything on the field is at
    /// least one cell.
    pub fn rect_cells(&self, r: &Rect) -> Option<(u16, u16, u16, u16)> {
        let eps = 1e-3;
        let left = r.left().max(0.0);
        let top = r.top().max(0.0);
        let right = (r.right() - eps).min(self.field.x - eps);
        let bottom = (r.bottom() - eps).min(self.field.y - eps);
        if right < left || bottom < top {
            return None;
        }
        let (c0, r0) = self.to_cell(Vec2::new(left, top))?;
        let (c1, r1) = self.to_cell(Vec2::new(right, bottom))?;
        Some((c0, r0, c1 - c0 + 1, r1 - r0 + 1))
    }
}
