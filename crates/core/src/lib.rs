//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule. It has no dependency on the terminal,
//! input devices or wall-clock time: the driver passes elapsed milliseconds to
//! [`Engine::update`] and forwards player actions.
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven shapes, built once from text templates and pivots
//! - [`board`]: 10x20 grid with bounds-checked access and line clearing
//! - [`piece`]: a shape placed on the board, with move/rotate candidates
//! - [`queue`]: upcoming pieces, refilled with shuffled batches of seven
//! - [`engine`]: the game state and its operations
//! - [`snapshot`]: the read-only view handed to renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::Engine;
//! use blockfall_types::{GameAction, TICK_INTERVAL_MS};
//!
//! let mut frames = 0;
//! let mut game = Engine::with_seed(12345, |_snapshot| frames += 1);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::RotateCw);
//! game.update(TICK_INTERVAL_MS);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(!game.is_game_over());
//! assert_eq!(game.board().filled_count(), 4);
//! drop(game);
//! assert_eq!(frames, 4);
//! ```

pub mod board;
pub mod catalog;
pub mod engine;
pub mod piece;
pub mod queue;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use catalog::{catalog, shape, HalfPoint, ShapeDef};
pub use engine::Engine;
pub use piece::Piece;
pub use queue::PieceQueue;
pub use snapshot::GameSnapshot;
