//! Terminal rendering for blockfall.
//!
//! Rendering is split in two: [`GameView`] turns a [`GameSnapshot`] into a
//! framebuffer of styled characters without any I/O, and
//! [`TerminalRenderer`] flushes framebuffers to the real terminal.
//!
//! [`GameSnapshot`]: blockfall_core::GameSnapshot

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use palette::{piece_color, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
