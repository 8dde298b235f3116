//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a size change or [`invalidate`]) is a
//! full redraw; later frames only emit the runs of glyphs that changed.
//!
//! [`invalidate`]: TerminalRenderer::invalidate

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal to its normal state.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. on resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(prev, fb, &mut self.buf)?
            }
            _ => encode_full_into(fb, &mut self.buf)?,
        }
        self.flush_buf()?;

        match &mut self.last {
            Some(prev) => prev.clone_from(fb),
            None => self.last = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .and_then(|_| self.stdout.flush())
            .context("failed to write to terminal")
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        write_run(fb, 0, y, fb.width(), &mut style, out)?;
    }
    reset_into(out)
}

/// Encode only the changed runs between two equally sized frames into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        write_run(next, x, y, len, &mut style, out)?;
    }
    reset_into(out)
}

fn write_run(
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    current: &mut Option<Style>,
    out: &mut Vec<u8>,
) -> Result<()> {
    for cx in x..x + len {
        let glyph = fb.get(cx, y).unwrap_or_default();
        if *current != Some(glyph.style) {
            apply_style_into(out, glyph.style)?;
            *current = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn reset_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Maximal horizontal runs `(x, y, len)` where the two frames differ.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut start = None;
        for x in 0..=next.width() {
            let differs = x < next.width() && prev.get(x, y) != next.get(x, y);
            match (differs, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, y, x - s));
                    start = None;
                }
                _ => {}
            }
        }
    }
    runs
}
