//! Blockfall (workspace facade crate).
//!
//! This package keeps a stable `blockfall::{core,input,term,client,types}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use blockfall_client as client;
pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
