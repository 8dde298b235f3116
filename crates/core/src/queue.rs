//! Piece queue - upcoming pieces, refilled one shuffled batch at a time
//!
//! Whenever fewer than [`MIN_QUEUED`] pieces are waiting, one full batch with
//! each of the seven kinds exactly once is shuffled and appended. Nothing
//! stops the same kind from appearing back to back across a batch boundary.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::piece::Piece;
use crate::types::{PieceKind, PIECE_COUNT};

/// Refill threshold checked before every draw
pub const MIN_QUEUED: usize = 2;

#[derive(Debug, Clone)]
pub struct PieceQueue {
    pieces: VecDeque<Piece>,
    rng: StdRng,
}

impl PieceQueue {
    /// Empty queue with a deterministic shuffle sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Empty queue seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            pieces: VecDeque::with_capacity(PIECE_COUNT + MIN_QUEUED),
            rng,
        }
    }

    /// Append one shuffled batch of all seven kinds (Fisher-Yates)
    pub fn replenish(&mut self) {
        let mut batch = PieceKind::ALL;
        batch.shuffle(&mut self.rng);
        log::debug!("queue refill: {:?}", batch);
        self.pieces.extend(batch.into_iter().map(Piece::spawn));
    }

    /// Take the next piece, refilling first if fewer than two are waiting
    pub fn next_piece(&mut self) -> Piece {
        if self.pieces.len() < MIN_QUEUED {
            self.replenish();
        }
        self.pieces
            .pop_front()
            .expect("queue holds a full batch after refill")
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Waiting pieces, front first
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }
}
