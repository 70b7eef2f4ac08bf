//! Core types shared across the workspace.
//! Pure data types with no external dependencies.

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const BASE_DROP_MS: u32 = 800;
pub const DROP_STEP_MS: u32 = 60;
pub const MIN_DROP_MS: u32 = 120;
pub const SOFT_DROP_MS: u32 = 45;

/// DAS/ARR timing for held horizontal movement (milliseconds)
pub const DEFAULT_DAS_MS: u32 = 150;
pub const DEFAULT_ARR_MS: u32 = 50;

/// Lines required per level advance
pub const LINES_PER_LEVEL: u32 = 10;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Pause,
    Restart,
}

/// Game lifecycle status
///
/// Transitions: NotStarted -> Running (start), Running <-> Paused (toggle),
/// Running -> GameOver (spawn collision), any -> Running (restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;

/// Line clear scoring, indexed by rows cleared in one lock (multiplied by level)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Bonus per row travelled by a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Bonus per row travelled by a held soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Side-effect request emitted by the game state machine.
///
/// The state machine never performs network I/O itself; the loop driver
/// drains these and forwards them to the score client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    /// Round ended with this final score.
    GameOver { score: u32 },
    /// The global best score should be (re)fetched.
    BestScoreQuery,
}
