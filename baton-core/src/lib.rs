//! Board-agnostic core logic for the Baton display firmware
//!
//! This crate contains everything that does not touch hardware:
//!
//! - Screen geometry, the 7-column font and the sixteen-slot table
//! - Configuration types for the controller, bus and animation
//! - The drawing surface trait implemented by the display driver
//! - The hand-off ring and the three worker routes

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod glyph;
pub mod scheduler;
pub mod traits;
