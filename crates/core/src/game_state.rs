//! Game state module - the complete piece/board state machine
//!
//! Ties together board, shape tables, RNG, and scoring. Owns the game
//! lifecycle (status transitions), gravity timing, and the score-event
//! queue that the loop driver drains for the score client. All network
//! and terminal concerns live outside; this module is pure state.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::{self, get_shape, PieceShape, SPAWN_Y};
use crate::rng::PiecePicker;
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms,
};
use crate::types::{GameAction, GameStatus, PieceKind, ScoreEvent, SOFT_DROP_MS};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a tetromino at its spawn position: rotation 0, horizontally
    /// centered, bounding box starting one row above the visible board.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: pieces::spawn_x(kind),
            y: SPAWN_Y,
        }
    }

    /// Get the shape (mino offsets) for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }
}

/// Outcome of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Piece moved down one row
    Moved,
    /// Piece locked; a new one spawned
    Locked,
    /// Piece locked and the next spawn collided
    GameOver,
}

const EVENT_QUEUE_CAP: usize = 8;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    next: PieceKind,
    picker: PiecePicker,
    status: GameStatus,
    score: u32,
    level: u32,
    lines: u32,
    drop_timer_ms: u32,
    events: ArrayVec<ScoreEvent, EVENT_QUEUE_CAP>,
}

impl GameState {
    /// Create a new game with the given RNG seed. The game starts in
    /// [`GameStatus::NotStarted`]; call [`start`](Self::start) to spawn
    /// the first piece.
    pub fn new(seed: u32) -> Self {
        let mut picker = PiecePicker::new(seed);
        let next = picker.draw();

        Self {
            board: Board::new(),
            active: None,
            next,
            picker,
            status: GameStatus::NotStarted,
            score: 0,
            level: 1,
            lines: 0,
            drop_timer_ms: 0,
            events: ArrayVec::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Start the game and spawn the first piece. No-op unless NotStarted.
    pub fn start(&mut self) {
        if self.status != GameStatus::NotStarted {
            return;
        }
        self.status = GameStatus::Running;
        let _ = self.events.try_push(ScoreEvent::BestScoreQuery);
        self.spawn_piece();
    }

    /// Restart from any status, reinitializing board/score/level/lines.
    /// The piece stream continues from the picker's current state.
    pub fn restart(&mut self) {
        let seed = self.picker.seed();
        *self = Self::new(seed);
        self.start();
    }

    /// Toggle Running <-> Paused. Ignored in other states.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            other => other,
        };
    }

    /// Drain the pending score events, oldest first.
    pub fn take_events(&mut self) -> ArrayVec<ScoreEvent, EVENT_QUEUE_CAP> {
        std::mem::take(&mut self.events)
    }

    /// Spawn the next piece. On spawn collision the round ends: status
    /// becomes GameOver and a [`ScoreEvent::GameOver`] is queued.
    fn spawn_piece(&mut self) -> bool {
        let piece = Tetromino::spawn(self.next);

        if self.board.collides(&piece.shape(), piece.x, piece.y) {
            self.active = None;
            self.status = GameStatus::GameOver;
            let _ = self.events.try_push(ScoreEvent::GameOver { score: self.score });
            return false;
        }

        self.active = Some(piece);
        self.next = self.picker.draw();
        self.drop_timer_ms = 0;
        true
    }

    /// Try to move the active piece horizontally. Collisions reject silently.
    pub fn try_move(&mut self, dx: i8) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if self.board.collides(&active.shape(), active.x + dx, active.y) {
            return false;
        }

        self.active = Some(Tetromino {
            x: active.x + dx,
            ..active
        });
        true
    }

    /// Try to rotate the active piece one step (+1 = clockwise), resolving
    /// wall kicks in fixed priority order. If every kick collides the piece
    /// is left untouched.
    pub fn try_rotate(&mut self, direction: i8) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let result = pieces::try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            direction,
            |x, y| self.board.fits(x, y),
        );

        if let Some((_, new_rotation, kick)) = result {
            self.active = Some(Tetromino {
                rotation: new_rotation,
                x: active.x + kick,
                ..active
            });
            return true;
        }

        false
    }

    /// One gravity step: move the piece down a row, or lock it where it
    /// stands and run the clear/score/spawn sequence.
    pub fn step_down(&mut self) -> StepResult {
        let Some(active) = self.active else {
            return StepResult::Locked;
        };

        if !self.board.collides(&active.shape(), active.x, active.y + 1) {
            self.active = Some(Tetromino {
                y: active.y + 1,
                ..active
            });
            return StepResult::Moved;
        }

        self.lock_piece()
    }

    /// Lock the active piece: merge into the board, clear full rows, apply
    /// line scores at the level in effect when the piece locked, then
    /// recompute level and spawn the next piece.
    fn lock_piece(&mut self) -> StepResult {
        let Some(active) = self.active.take() else {
            return StepResult::Locked;
        };

        self.board.merge(&active.shape(), active.x, active.y, active.kind);

        let cleared = self.board.clear_full_rows();
        self.score += calculate_line_score(cleared, self.level);
        self.lines += cleared as u32;
        self.level = calculate_level(self.lines);

        if self.spawn_piece() {
            StepResult::Locked
        } else {
            StepResult::GameOver
        }
    }

    /// Maximal distance the active piece can fall before it rests
    fn drop_distance(&self) -> i8 {
        let Some(active) = self.active else {
            return 0;
        };
        let shape = active.shape();

        let mut distance: i8 = 0;
        while !self.board.collides(&shape, active.x, active.y + distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Row where the active piece would rest (ghost piece, display only)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + self.drop_distance())
    }

    /// Drop the active piece to its resting row in one committed step,
    /// award the drop bonus, and lock.
    pub fn hard_drop(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let distance = self.drop_distance();
        if distance > 0 {
            self.active = Some(Tetromino {
                y: active.y + distance,
                ..active
            });
        }
        self.score += calculate_drop_score(distance as u32, true);
        self.lock_piece();
        true
    }

    /// One held-soft-drop step: advance a row for +1, or lock if blocked
    fn soft_drop_step(&mut self) -> StepResult {
        let result = self.step_down();
        if result == StepResult::Moved {
            self.score += calculate_drop_score(1, false);
        }
        result
    }

    /// Gravity interval currently in effect
    pub fn drop_interval_ms(&self, soft_drop: bool) -> u32 {
        if soft_drop {
            SOFT_DROP_MS
        } else {
            get_drop_interval_ms(self.level)
        }
    }

    /// Advance the game by `elapsed_ms`. Performs at most one gravity step
    /// per call: when the accumulated time passes the current interval the
    /// piece steps down and the accumulator resets to zero, so a stalled
    /// frame never produces catch-up steps.
    ///
    /// Returns true if a gravity step happened.
    pub fn tick(&mut self, elapsed_ms: u32, soft_drop: bool) -> bool {
        if self.status != GameStatus::Running || self.active.is_none() {
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        // Strictly exceeds: landing exactly on the interval is not a step.
        if self.drop_timer_ms <= self.drop_interval_ms(soft_drop) {
            return false;
        }
        self.drop_timer_ms = 0;

        if soft_drop {
            self.soft_drop_step();
        } else {
            self.step_down();
        }
        true
    }

    /// Apply a player action, gated by status. Movement and drops only work
    /// while Running; pause and restart have their own gating; any gameplay
    /// input starts a NotStarted game.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                let before = self.status;
                self.toggle_pause();
                self.status != before
            }
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if self.status == GameStatus::NotStarted => {
                self.start();
                true
            }
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::RotateCw => self.try_rotate(1),
            GameAction::RotateCcw => self.try_rotate(-1),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::SoftDrop => {
                if self.status != GameStatus::Running {
                    return false;
                }
                self.soft_drop_step() == StepResult::Moved
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
