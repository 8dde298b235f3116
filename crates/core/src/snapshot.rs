//! Read-only game view handed to render callbacks

use crate::types::{BoardView, BOARD_HEIGHT, BOARD_WIDTH};

/// What the renderer sees: the board with the active piece overlaid, plus
/// the game-over flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardView,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn filled_count(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            game_over: false,
        }
    }
}
