//! Read-only snapshot of the game state for rendering.
//!
//! The view layer consumes one of these per frame and never touches the
//! live `GameState`. Plain arrays keep the copy allocation-free.

use crate::game_state::{GameState, Tetromino};
use crate::types::{Cell, GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub status: GameStatus,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            status: GameStatus::NotStarted,
            score: 0,
            level: 1,
            lines: 0,
        }
    }
}

impl GameState {
    /// Fill a snapshot in place; callers keep one per frame and reuse it.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board().write_grid(&mut out.board);
        out.active = self.active().map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next_piece();
        out.status = self.status();
        out.score = self.score();
        out.level = self.level();
        out.lines = self.lines();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
