//! Piece colors, indexed by piece id.

use crate::fb::Rgb;
use crate::types::{PieceKind, PIECE_COUNT};

pub const PALETTE: [Rgb; PIECE_COUNT] = [
    Rgb::new(0x00, 0x7F, 0xFF),
    Rgb::new(0xFF, 0xFF, 0x00),
    Rgb::new(0x7F, 0x7F, 0xFF),
    Rgb::new(0xFF, 0x00, 0x00),
    Rgb::new(0x00, 0xFF, 0x00),
    Rgb::new(0xFF, 0x7F, 0x00),
    Rgb::new(0x00, 0x00, 0xFF),
];

pub fn piece_color(kind: PieceKind) -> Rgb {
    PALETTE[kind.id() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(piece_color(PieceKind::I), Rgb::new(0, 127, 255));
        assert_eq!(piece_color(PieceKind::J), Rgb::new(0, 0, 255));
    }
}
