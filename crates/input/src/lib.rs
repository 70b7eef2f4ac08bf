//! Terminal input module.
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::GameAction`] and provides a DAS/ARR handler suitable
//! for terminal environments, including terminals without key-release
//! events. The handler also tracks the held soft-drop key, which the
//! game loop feeds into gravity instead of discrete actions.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
