//! Score-service client module.
//!
//! Talks JSON over HTTP to the remote auth/score service. All calls are
//! fire-and-forget relative to the game loop: commands go in through a
//! bounded channel, results come back as [`ClientNotice`] values read with
//! a non-blocking `try_recv`. A failed or slow call never blocks gameplay.

pub mod http;
pub mod protocol;
pub mod runtime;

pub use blockfall_types as types;

pub use protocol::ClientNotice;
pub use runtime::{ClientCommand, ClientConfig, ScoreClient};
