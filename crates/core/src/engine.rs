//! Engine module - the complete game state and its rules
//!
//! The engine owns the board, the active piece, the piece queue, the gravity
//! clock and the game-over flag. Every action builds a candidate piece, tests
//! it against the board and either commits or discards it.
//!
//! A caller-supplied callback receives a [`GameSnapshot`] whenever visible
//! state may have changed. The callback gets a copy of the view rather than
//! the engine, so it cannot re-enter it.

use crate::board::Board;
use crate::piece::Piece;
use crate::queue::PieceQueue;
use crate::snapshot::GameSnapshot;
use crate::types::{BoardView, GameAction, BOARD_HEIGHT, BOARD_WIDTH, TICK_INTERVAL_MS};

/// Game state container and rules.
pub struct Engine<F>
where
    F: FnMut(&GameSnapshot),
{
    board: Board,
    active: Piece,
    queue: PieceQueue,
    /// Elapsed time not yet consumed by gravity ticks, in milliseconds
    clock_ms: f64,
    game_over: bool,
    on_change: F,
}

impl<F> Engine<F>
where
    F: FnMut(&GameSnapshot),
{
    /// Create a game whose piece order is seeded from the operating system
    pub fn new(on_change: F) -> Self {
        Self::with_queue(PieceQueue::from_os_rng(), on_change)
    }

    /// Create a game with a reproducible piece order
    pub fn with_seed(seed: u64, on_change: F) -> Self {
        Self::with_queue(PieceQueue::with_seed(seed), on_change)
    }

    fn with_queue(mut queue: PieceQueue, on_change: F) -> Self {
        let active = queue.next_piece();
        log::debug!("new game, first piece {:?}", active.kind);
        Self {
            board: Board::new(),
            active,
            queue,
            clock_ms: 0.0,
            game_over: false,
            on_change,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Piece {
        self.active
    }

    /// Number of pieces waiting behind the active one
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether `candidate` would overlap a filled cell or leave the board
    /// (sides or bottom). Pure.
    pub fn would_collide(&self, candidate: &Piece) -> bool {
        candidate.collides_with(&self.board)
    }

    /// Board with the active piece overlaid; cells outside the grid are dropped
    pub fn render_view(&self) -> BoardView {
        let mut view = self.board.view();
        for (x, y) in self.active.cells() {
            if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                view[y as usize][x as usize] = Some(self.active.kind);
            }
        }
        view
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.render_view(),
            game_over: self.game_over,
        }
    }

    fn notify(&mut self) {
        let snap = self.snapshot();
        (self.on_change)(&snap);
    }

    /// Advance the gravity clock by `dt_ms`, running one tick per elapsed
    /// interval. Ignored after game over.
    pub fn update(&mut self, dt_ms: f64) {
        if self.game_over || !dt_ms.is_finite() || dt_ms < 0.0 {
            return;
        }

        self.clock_ms += dt_ms;
        while self.clock_ms >= TICK_INTERVAL_MS {
            self.tick();
            self.clock_ms -= TICK_INTERVAL_MS;
        }
    }

    /// One gravity step (also the soft drop): move down a row, or lock and
    /// bring in the next piece if the row below is blocked.
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }

        let dropped = self.active.shifted(0, 1);
        if self.would_collide(&dropped) {
            self.lock();
            self.request_next();
        } else {
            self.active = dropped;
            self.notify();
        }
    }

    /// Try to shift the active piece. Returns whether it moved.
    pub fn move_active(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }

        let moved = self.active.shifted(dx, dy);
        let ok = !self.would_collide(&moved);
        if ok {
            self.active = moved;
        }
        self.notify();
        ok
    }

    /// Try to rotate the active piece about its pivot. There are no wall
    /// kicks: a blocked rotation leaves the piece unchanged.
    pub fn rotate_active(&mut self, clockwise: bool) -> bool {
        if self.game_over {
            return false;
        }

        let rotated = self.active.rotated(clockwise);
        let ok = !self.would_collide(&rotated);
        if ok {
            self.active = rotated;
        }
        self.notify();
        ok
    }

    /// Drop the active piece as far as it goes, lock it and activate the next.
    pub fn hard_drop_active(&mut self) {
        if self.game_over {
            return;
        }

        let mut landed = self.active;
        loop {
            let below = landed.shifted(0, 1);
            if self.would_collide(&below) {
                break;
            }
            landed = below;
        }

        self.active = landed;
        self.lock();
        self.request_next();
    }

    /// Route an input action to the matching operation
    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => {
                self.move_active(-1, 0);
            }
            GameAction::MoveRight => {
                self.move_active(1, 0);
            }
            GameAction::RotateCw => {
                self.rotate_active(true);
            }
            GameAction::RotateCcw => {
                self.rotate_active(false);
            }
            GameAction::HardDrop => self.hard_drop_active(),
        }
    }

    /// Write the active piece onto the board and clear full rows.
    /// Returns the number of rows cleared.
    fn lock(&mut self) -> usize {
        let kind = self.active.kind;
        for (x, y) in self.active.cells() {
            self.board.set(x, y, Some(kind));
        }

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            log::info!("{:?} locked, cleared {} row(s)", kind, cleared);
        }
        cleared
    }

    /// Activate the next queued piece; game over if it spawns into the stack.
    fn request_next(&mut self) {
        self.active = self.queue.next_piece();
        if self.would_collide(&self.active) {
            self.game_over = true;
            log::info!("game over: {:?} blocked at spawn", self.active.kind);
        } else {
            log::debug!("spawned {:?}", self.active.kind);
        }
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, PIECE_COUNT, SPAWN_POSITION};
    use std::cell::Cell;
    use std::rc::Rc;

    fn quiet(seed: u64) -> Engine<impl FnMut(&GameSnapshot)> {
        Engine::with_seed(seed, |_| {})
    }

    fn counted(seed: u64) -> (Engine<impl FnMut(&GameSnapshot)>, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let engine = Engine::with_seed(seed, move |_| c.set(c.get() + 1));
        (engine, count)
    }

    fn with_active<F: FnMut(&GameSnapshot)>(engine: &mut Engine<F>, kind: PieceKind) {
        engine.active = Piece::spawn(kind);
    }

    #[test]
    fn test_new_engine() {
        let engine = quiet(1);
        assert_eq!(engine.queue_len(), PIECE_COUNT - 1);
        assert_eq!((engine.active.x, engine.active.y), SPAWN_POSITION);
        assert!(!engine.would_collide(&engine.active));
        assert!(!engine.is_game_over());
        assert_eq!(engine.clock_ms(), 0.0);
        assert_eq!(engine.board().filled_count(), 0);
    }

    #[test]
    fn test_first_batch_is_a_permutation() {
        let engine = quiet(5);
        let mut kinds: Vec<PieceKind> = engine.queue.iter().map(|p| p.kind).collect();
        kinds.push(engine.active.kind);
        kinds.sort();
        assert_eq!(kinds, PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_move_commits_or_discards() {
        let (mut engine, count) = counted(2);
        with_active(&mut engine, PieceKind::I);

        assert!(engine.move_active(1, 0));
        assert_eq!(engine.active.x, 4);

        // cols 6..9 is the last legal spot
        assert!(engine.move_active(2, 0));
        assert!(!engine.move_active(1, 0));
        assert_eq!(engine.active.x, 6);

        // callback fires for accepted and rejected moves alike
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_rotation_is_rejected_without_kicks() {
        let mut engine = quiet(3);
        with_active(&mut engine, PieceKind::T);
        // T spawn cells (4,0) (3,1) (4,1) (5,1); clockwise adds (4,2)
        engine.board.set(4, 2, Some(PieceKind::O));

        let before = engine.active;
        assert!(!engine.rotate_active(true));
        assert_eq!(engine.active, before);

        // counter-clockwise needs (4,2) too
        assert!(!engine.rotate_active(false));

        engine.board.set(4, 2, None);
        assert!(engine.rotate_active(true));
        assert_ne!(engine.active.offsets, before.offsets);
    }

    #[test]
    fn test_rotate_twice_each_way_restores_offsets() {
        let mut engine = quiet(4);
        for kind in PieceKind::ALL {
            with_active(&mut engine, kind);
            engine.active = engine.active.shifted(0, 5);
            let start = engine.active;
            assert!(engine.rotate_active(true));
            assert!(engine.rotate_active(true));
            assert!(engine.rotate_active(false));
            assert!(engine.rotate_active(false));
            assert_eq!(engine.active, start, "{:?}", kind);
        }
    }

    #[test]
    fn test_lock_writes_piece_id() {
        let mut engine = quiet(6);
        with_active(&mut engine, PieceKind::S);
        engine.active = engine.active.shifted(0, 18);

        assert_eq!(engine.lock(), 0);
        for (x, y) in engine.active.cells() {
            assert_eq!(engine.board.get(x, y), Some(Some(PieceKind::S)));
        }
        assert_eq!(engine.board.filled_count(), 4);
    }

    #[test]
    fn test_lock_drops_cells_above_the_board() {
        let mut engine = quiet(6);
        engine.active = Piece::spawn(PieceKind::I).rotated(true);
        engine.lock();
        // (5,-1) is outside the grid and silently skipped
        assert_eq!(engine.board.filled_count(), 3);
    }

    #[test]
    fn test_completing_bottom_row_clears_it() {
        let mut engine = quiet(7);
        engine.board = Board::from_ascii(&["Z.........", "OOO....TTT"]);
        with_active(&mut engine, PieceKind::I);

        engine.hard_drop_active();

        // row 19 removed, row 18 shifted into it, fresh empty row on top
        assert_eq!(engine.board.height(), 20);
        assert_eq!(engine.board.get(0, 19), Some(Some(PieceKind::Z)));
        assert_eq!(engine.board.filled_count(), 1);
        assert!((0..20).all(|y| !engine.board.is_row_full(y)));
    }

    #[test]
    fn test_non_adjacent_rows_cleared_in_one_lock() {
        let mut engine = quiet(8);
        engine.board = Board::from_ascii(&[
            "JJJJJ.JJJJ", // 15
            "L.LLL.LLLL", // 16
            "SSSSS.SSS.", // 17
            "TTTTT.TTTT", // 18
            ".OOOOOOOOO", // 19
        ]);
        let row_16 = engine.board.view()[16];
        let row_17 = engine.board.view()[17];
        let row_19 = engine.board.view()[19];

        // vertical I in column 5, lands on (5, 19)
        engine.active = Piece::spawn(PieceKind::I).rotated(true);
        engine.hard_drop_active();

        let view = engine.board.view();
        let mut expect_16 = row_16;
        expect_16[5] = Some(PieceKind::I);
        let mut expect_17 = row_17;
        expect_17[5] = Some(PieceKind::I);

        assert_eq!(view[19], row_19);
        assert_eq!(view[18], expect_17);
        assert_eq!(view[17], expect_16);
        assert!(view[..17].iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_clear_many_stacked_rows() {
        let mut engine = quiet(9);
        engine.board = Board::from_ascii(&[
            "T.........",
            "IIIIIIIII.",
            "IIIIIIIII.",
            "IIIIIIIII.",
            "IIIIIIIII.",
        ]);
        // vertical I at column 9 fills rows 16..19
        engine.active = Piece::spawn(PieceKind::I).rotated(true).shifted(4, 0);
        engine.hard_drop_active();

        assert_eq!(engine.board.filled_count(), 1);
        assert_eq!(engine.board.get(0, 19), Some(Some(PieceKind::T)));
    }

    #[test]
    fn test_lock_reports_rows_cleared() {
        let mut engine = quiet(9);
        engine.board = Board::from_ascii(&[
            "IIIIIIIII.",
            "IIIIIIIII.",
            "IIIIIIIII.",
            "IIIIIIIII.",
        ]);
        engine.active = Piece::spawn(PieceKind::I).rotated(true).shifted(4, 17);

        assert_eq!(engine.lock(), 4);
        assert_eq!(engine.board.filled_count(), 0);
    }

    #[test]
    fn test_hard_drop_fires_one_callback() {
        let (mut engine, count) = counted(10);
        engine.hard_drop_active();
        assert_eq!(count.get(), 1);
        assert_eq!(engine.board.filled_count(), 4);
        assert_eq!(engine.queue_len(), PIECE_COUNT - 2);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let mut engine = quiet(11);
        with_active(&mut engine, PieceKind::O);
        engine.hard_drop_active();
        assert_eq!(engine.board.get(4, 18), Some(Some(PieceKind::O)));
        assert_eq!(engine.board.get(5, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_tick_moves_then_locks() {
        let (mut engine, count) = counted(12);
        with_active(&mut engine, PieceKind::O);
        for _ in 0..18 {
            engine.tick();
        }
        assert_eq!(engine.active.y, 18);
        assert_eq!(engine.board.filled_count(), 0);

        engine.tick();
        assert_eq!(engine.board.filled_count(), 4);
        assert_eq!((engine.active.x, engine.active.y), SPAWN_POSITION);
        assert_eq!(count.get(), 19);
    }

    #[test]
    fn test_update_accumulates_and_catches_up() {
        let (mut engine, count) = counted(13);
        let y0 = engine.active.y;

        engine.update(150.0);
        assert_eq!(engine.active.y, y0);
        assert_eq!(count.get(), 0);

        engine.update(60.0);
        assert_eq!(engine.active.y, y0 + 1);
        assert!((engine.clock_ms() - 10.0).abs() < 1e-9);

        engine.update(3.0 * TICK_INTERVAL_MS);
        assert_eq!(engine.active.y, y0 + 4);
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn test_update_ignores_bad_deltas() {
        let mut engine = quiet(13);
        engine.update(f64::NAN);
        engine.update(-50.0);
        engine.update(f64::INFINITY);
        assert_eq!(engine.clock_ms(), 0.0);
    }

    #[test]
    fn test_spawn_blocked_sets_game_over() {
        let (mut engine, count) = counted(14);
        for x in 3..7 {
            engine.board.set(x, 0, Some(PieceKind::J));
            engine.board.set(x, 1, Some(PieceKind::J));
        }

        engine.request_next();
        assert!(engine.is_game_over());
        assert_eq!(count.get(), 1);

        let board = engine.board.clone();
        let active = engine.active;
        engine.tick();
        engine.update(10.0 * TICK_INTERVAL_MS);
        assert_eq!(engine.board, board);
        assert_eq!(engine.active, active);
        assert_eq!(engine.clock_ms(), 0.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_actions_after_game_over_are_noops() {
        let mut engine = quiet(15);
        engine.game_over = true;
        let board = engine.board.clone();
        let active = engine.active;

        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::HardDrop,
        ] {
            engine.apply_action(action);
        }

        assert_eq!(engine.board, board);
        assert_eq!(engine.active, active);
    }

    #[test]
    fn test_render_view_overlays_and_clips() {
        let mut engine = quiet(16);
        engine.board.set(0, 19, Some(PieceKind::L));
        engine.active = Piece::spawn(PieceKind::I).rotated(true);

        let view = engine.render_view();
        assert_eq!(view[19][0], Some(PieceKind::L));
        assert_eq!(view[0][5], Some(PieceKind::I));
        assert_eq!(view[2][5], Some(PieceKind::I));
        let filled = view.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(filled, 4);

        // the board itself is untouched
        assert_eq!(engine.board.filled_count(), 1);
    }

    #[test]
    fn test_apply_action_routes() {
        let mut engine = quiet(17);
        with_active(&mut engine, PieceKind::T);
        engine.apply_action(GameAction::MoveLeft);
        assert_eq!(engine.active.x, 2);
        engine.apply_action(GameAction::MoveRight);
        engine.apply_action(GameAction::MoveRight);
        assert_eq!(engine.active.x, 4);
        engine.apply_action(GameAction::RotateCw);
        assert_eq!(
            engine.active.offsets,
            Piece::spawn(PieceKind::T).rotated(true).offsets
        );
        engine.apply_action(GameAction::HardDrop);
        assert_eq!(engine.board.filled_count(), 4);
    }
}
