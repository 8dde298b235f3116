//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used by the engine, the terminal renderer and the input mapper alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_INTERVAL_MS` | 200 | Gravity step (5 ticks per second) |
//! | `FRAME_MS` | 16.67 | Driver cadence (60 updates per second) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_id(2).unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.id(), 2);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Where newly activated pieces are anchored (column, row)
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Gravity tick interval in milliseconds (5 ticks per second)
pub const TICK_INTERVAL_MS: f64 = 1000.0 / 5.0;

/// Driver frame interval in milliseconds (60 updates per second)
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Number of distinct piece kinds, and the size of one shuffled batch
pub const PIECE_COUNT: usize = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_INTERVAL_MS, 200.0);
        assert!((FRAME_MS - 16.666).abs() < 0.01);
        assert_eq!(SPAWN_POSITION, (3, 0));
    }

    #[test]
    fn piece_ids_round_trip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i);
            assert_eq!(PieceKind::from_id(i as u8), Some(*kind));
        }
        assert_eq!(PieceKind::from_id(7), None);
    }
}

/// The seven piece kinds, in catalog order.
///
/// The discriminant is the piece-type identifier (0..6) stored in board cells
/// and used to index the color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I = 0,
    O = 1,
    T = 2,
    Z = 3,
    S = 4,
    L = 5,
    J = 6,
}

impl PieceKind {
    /// All kinds in identifier order
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Piece-type identifier in 0..6
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Inverse of [`PieceKind::id`]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Single uppercase letter, used by text dumps of the board
    pub fn letter(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Board grid as rows of cells, `view[y][x]`
pub type BoardView = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Player actions forwarded from the input layer to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop piece to the lowest free position and lock it
    HardDrop,
}
