//! Piece instances - a catalog shape placed on the board

use crate::board::Board;
use crate::catalog::{self, HalfPoint, Offsets, MINOS};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_POSITION};

/// A falling piece: its kind, its current (possibly rotated) offsets and its
/// anchor position in board space.
///
/// Pieces are small `Copy` values. Moves and rotations return a new candidate
/// that the engine tests before committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub offsets: Offsets,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Fresh piece in the default orientation at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            offsets: catalog::shape(kind).offsets,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Rotation center of this piece kind, in half cells
    pub fn pivot(&self) -> HalfPoint {
        catalog::shape(self.kind).pivot
    }

    /// Board cells covered by the piece (offset + pivot + position).
    ///
    /// Cells above the board (negative y) are included.
    pub fn cells(&self) -> [(i8, i8); MINOS] {
        let pivot = self.pivot();
        self.offsets.map(|o| {
            let hx = o.x + pivot.x;
            let hy = o.y + pivot.y;
            debug_assert!(
                hx % 2 == 0 && hy % 2 == 0,
                "{:?} resolves off the cell grid: ({hx}, {hy}) half cells",
                self.kind
            );
            (
                self.x.saturating_add(hx.div_euclid(2)),
                self.y.saturating_add(hy.div_euclid(2)),
            )
        })
    }

    /// Copy moved by (dx, dy)
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Copy turned a quarter turn about the pivot
    pub fn rotated(self, clockwise: bool) -> Self {
        Self {
            offsets: self.offsets.map(|o| o.rotated(clockwise)),
            ..self
        }
    }

    /// Whether this placement is illegal on `board`.
    ///
    /// True if any cell is left of column 0, right of column 9, at or below
    /// row 20, or on a filled cell. Rows above the board are allowed.
    pub fn collides_with(&self, board: &Board) -> bool {
        self.cells().iter().any(|&(x, y)| {
            x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 || board.is_occupied(x, y)
        })
    }
}
