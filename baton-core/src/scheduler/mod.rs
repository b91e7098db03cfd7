//! Hand-off scheduler
//!
//! Three workers pass a single baton through a ring of four gates. The
//! baton owns the display, so the ring alone decides who may draw.

pub mod ring;
pub mod route;
pub mod worker;

pub use ring::{Baton, Gate, HandOffRing, GATE_COUNT};
pub use route::{entry_gates, visiting_order, Turn, WorkerId, TURNS_PER_CYCLE};
pub use worker::Worker;
