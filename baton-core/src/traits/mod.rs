//! Hardware abstraction traits
//!
//! These traits define the interface between the hand-off ring and the
//! display driver.

pub mod display;

pub use display::{Surface, SurfaceExt};
