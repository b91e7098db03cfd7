//! Embassy async tasks
//!
//! The three hand-off workers. They share nothing but the ring.

pub mod worker;

pub use worker::{worker_task, DisplayRing};
