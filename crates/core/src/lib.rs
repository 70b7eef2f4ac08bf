//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation
//! logic. It has zero dependencies on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every game rule
//! - **Portable**: Runs in any environment (terminal, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`game_state`]: Complete game state including active piece, scoring, timing
//! - [`pieces`]: Tetromino shape tables and kick-based rotation
//! - [`rng`]: Seeded uniform piece selection
//! - [`scoring`]: Line scores, leveling, and gravity intervals
//! - [`snapshot`]: Read-only view of the state for rendering
//!
//! # Game Rules
//!
//! This implementation follows the classic ruleset:
//!
//! - Pieces spawn horizontally centered, one row above the visible board
//! - Rotation tries horizontal kick offsets `[0, -1, +1, -2, +2]` in order
//! - Line scores `[0, 100, 300, 500, 800]` multiplied by the current level
//! - Level advances every 10 cleared lines; gravity speeds up 60 ms per
//!   level down to a 120 ms floor
//! - A held soft drop replaces gravity with a fixed 45 ms cadence and pays
//!   +1 per row; a hard drop commits the full distance at +2 per row
//!
//! # Timing
//!
//! The loop driver calls [`GameState::tick`](game_state::GameState::tick)
//! with the elapsed milliseconds every frame. One gravity step fires when the
//! accumulated time exceeds the current interval; the accumulator then resets
//! to zero, so a stalled frame never produces catch-up steps.
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // hard drop awards points
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, Tetromino};
pub use pieces::{get_shape, try_rotate};
pub use rng::{PiecePicker, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
