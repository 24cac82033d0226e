//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in hexaxis-core:
//!
//! - Trajectory engine (constant-acceleration step/dir generator)
//! - Endstop bank over GPIO inputs
//! - Shared driver enable line over a GPIO output

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod io;
pub mod stepper;

#[cfg(test)]
pub(crate) mod testing;
