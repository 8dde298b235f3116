//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::palette::piece_color;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const HELP: &str = "←→ move  c/x rotate  space drop  q quit";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Stateless board renderer.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up terminal glyphs
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of the bordered board in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Top-left corner of the border for a viewport (board centered)
    pub fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (frame_w, frame_h) = self.frame_size();
        let (ox, oy) = self.origin(viewport);

        self.draw_border(fb, ox, oy, frame_w, frame_h);

        let empty = Style::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(kind) => ('█', Style::new(piece_color(*kind), WELL_BG).bold()),
                    None => ('·', empty),
                };
                let px = ox + 1 + x as u16 * self.cell_w;
                let py = oy + 1 + y as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        if snap.game_over {
            self.draw_centered(fb, ox, oy + frame_h / 2, frame_w, " GAME OVER ");
        }

        let help_y = oy.saturating_add(frame_h);
        if help_y < viewport.height && HELP.chars().count() as u16 <= viewport.width {
            let x = viewport.width.saturating_sub(HELP.chars().count() as u16) / 2;
            fb.put_str(x, help_y, HELP, Style::default().dim());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let right = x + w - 1;
        let bottom = y + h - 1;

        fb.put(x, y, '┌', style);
        fb.put(right, y, '┐', style);
        fb.put(x, bottom, '└', style);
        fb.put(right, bottom, '┘', style);
        for cx in x + 1..right {
            fb.put(cx, y, '─', style);
            fb.put(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            fb.put(x, cy, '│', style);
            fb.put(right, cy, '│', style);
        }
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(tx, y, text, style);
    }
}
