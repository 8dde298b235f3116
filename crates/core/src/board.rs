//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use std::fmt;

use crate::types::{BoardView, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Out-of-bounds writes are ignored and return false
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Remove row `y`, shifting every row above it down by one and
    /// inserting an empty row at the top.
    pub fn remove_row(&mut self, y: usize) {
        if y >= HEIGHT {
            return;
        }
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(None);
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned bottom to top. After a removal the same index is
    /// checked again, since the row above has just moved into it; this catches
    /// stacked and non-contiguous full rows in a single pass.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = HEIGHT;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Copy of the grid as rows, `view[y][x]`
    pub fn view(&self) -> BoardView {
        let mut view: BoardView = [[None; WIDTH]; HEIGHT];
        for (y, row) in view.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
        view
    }

    /// Build a board from text rows, aligned to the bottom of the grid.
    ///
    /// `.` is empty, a piece letter (`I O T Z S L J`) fills the cell with that
    /// kind and any other character fills it with `I`. Rows longer than the
    /// board are truncated; extra rows beyond the height are ignored from the top.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_ascii(&["T.........", "IIIIIIIII."]);
    /// assert!(board.is_occupied(0, 18));
    /// assert!(!board.is_occupied(9, 19));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let skip = rows.len().saturating_sub(HEIGHT);
        let top = HEIGHT - (rows.len() - skip);
        for (i, row) in rows.iter().skip(skip).enumerate() {
            let y = (top + i) as i8;
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                board.set(x as i8, y, parse_cell(ch));
            }
        }
        board
    }
}

fn parse_cell(ch: char) -> Cell {
    match ch {
        '.' | ' ' => None,
        'I' => Some(PieceKind::I),
        'O' => Some(PieceKind::O),
        'T' => Some(PieceKind::T),
        'Z' => Some(PieceKind::Z),
        'S' => Some(PieceKind::S),
        'L' => Some(PieceKind::L),
        'J' => Some(PieceKind::J),
        _ => Some(PieceKind::I),
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..HEIGHT {
            for cell in self.row(y) {
                let ch = cell.map(PieceKind::letter).unwrap_or('.');
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_remove_row_shifts_rows_above() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::I));
        board.set(1, 5, Some(PieceKind::T));
        board.set(2, 6, Some(PieceKind::O));

        board.remove_row(6);

        assert_eq!(board.get(0, 1), Some(Some(PieceKind::I)));
        assert_eq!(board.get(1, 6), Some(Some(PieceKind::T)));
        assert_eq!(board.get(2, 6), Some(None));
        assert_eq!(board.get(0, 0), Some(None));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_from_ascii_bottom_aligned() {
        let board = Board::from_ascii(&["S.........", "..........", "LLLLL....."]);
        assert_eq!(board.get(0, 17), Some(Some(PieceKind::S)));
        assert_eq!(board.get(4, 19), Some(Some(PieceKind::L)));
        assert_eq!(board.filled_count(), 6);
    }

    #[test]
    fn test_display_matches_from_ascii() {
        let board = Board::from_ascii(&["J........Z"]);
        let text = board.to_string();
        let last = text.lines().last().unwrap();
        assert_eq!(last, "J........Z");
        assert_eq!(text.lines().count(), 20);
    }
}
