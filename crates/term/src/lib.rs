//! Terminal rendering module.
//!
//! Renders game snapshots into a simple framebuffer that is flushed to the
//! terminal by a diffing backend. The view layer is pure (no I/O) so it can
//! be unit-tested; only [`renderer::TerminalRenderer`] touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, HudInfo, Viewport};
pub use renderer::TerminalRenderer;
