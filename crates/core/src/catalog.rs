//! Piece catalog - the seven shapes and their rotation pivots
//!
//! Each shape is declared as a 4x2 text template plus a pivot. The catalog is
//! built once on first access: filled markers are collected in reading order
//! and re-expressed relative to the pivot.
//!
//! Pivots sit on whole or half cells (e.g. 1.5 for the I and O pieces), so all
//! catalog coordinates are stored in *half-cell units*. That keeps rotation and
//! the offset + pivot sum exact integers; see [`HalfPoint`].

use arrayvec::ArrayVec;
use lazy_static::lazy_static;

use crate::types::{PieceKind, PIECE_COUNT};

/// Number of minos in every piece
pub const MINOS: usize = 4;

/// A 2D point measured in half cells (both coordinates doubled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfPoint {
    pub x: i8,
    pub y: i8,
}

impl HalfPoint {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Quarter turn about the origin.
    ///
    /// `(x, y)` becomes `(y * mx, x * my)` with `(mx, my)` = `(-1, 1)` for
    /// clockwise and `(1, -1)` for counter-clockwise (screen coordinates, y down).
    pub fn rotated(self, clockwise: bool) -> Self {
        let (mx, my) = if clockwise { (-1, 1) } else { (1, -1) };
        Self::new(self.y * mx, self.x * my)
    }
}

/// Pivot-relative mino offsets of a piece
pub type Offsets = [HalfPoint; MINOS];

/// Immutable definition of one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub kind: PieceKind,
    /// Rotation center, in half cells
    pub pivot: HalfPoint,
    /// Default orientation, relative to the pivot
    pub offsets: Offsets,
}

/// Shape templates in identifier order: (pivot, rows). `#` marks a mino.
const TEMPLATES: [((f32, f32), [&str; 2]); PIECE_COUNT] = [
    ((1.5, 0.5), ["####", "    "]),
    ((1.5, 0.5), [" ## ", " ## "]),
    ((1.0, 1.0), [" #  ", "### "]),
    ((1.0, 1.0), ["##  ", " ## "]),
    ((1.0, 1.0), [" ## ", "##  "]),
    ((1.0, 1.0), ["  # ", "### "]),
    ((1.0, 1.0), ["#   ", "### "]),
];

lazy_static! {
    static ref CATALOG: [ShapeDef; PIECE_COUNT] = build_catalog();
}

/// All seven shape definitions, indexed by piece id.
pub fn catalog() -> &'static [ShapeDef; PIECE_COUNT] {
    &CATALOG
}

/// Shape definition for a piece kind.
pub fn shape(kind: PieceKind) -> &'static ShapeDef {
    &CATALOG[kind.id() as usize]
}

fn build_catalog() -> [ShapeDef; PIECE_COUNT] {
    PieceKind::ALL.map(|kind| {
        let (pivot, rows) = TEMPLATES[kind.id() as usize];
        let pivot = HalfPoint::new(to_half_units(pivot.0), to_half_units(pivot.1));

        let offsets: ArrayVec<HalfPoint, MINOS> = template_points(&rows)
            .into_iter()
            .map(|(x, y)| HalfPoint::new(x * 2 - pivot.x, y * 2 - pivot.y))
            .collect();

        ShapeDef {
            kind,
            pivot,
            offsets: offsets
                .into_inner()
                .expect("every template has exactly four minos"),
        }
    })
}

/// Collect the (column, row) of every filled marker in reading order.
fn template_points(rows: &[&str]) -> ArrayVec<(i8, i8), MINOS> {
    let mut points = ArrayVec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c != ' ' {
                points.push((x as i8, y as i8));
            }
        }
    }
    points
}

fn to_half_units(v: f32) -> i8 {
    let doubled = v * 2.0;
    debug_assert!(doubled.fract() == 0.0, "pivot {v} is not on a half cell");
    doubled as i8
}
