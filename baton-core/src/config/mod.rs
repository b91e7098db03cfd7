//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware fills these from
//! `baton.toml` at build time.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
