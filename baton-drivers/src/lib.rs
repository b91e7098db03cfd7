//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in baton-core:
//!
//! - PCD8544 84x48 LCD over SPI with D/C and reset lines

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
