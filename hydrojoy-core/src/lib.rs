//! Persistent configuration core for the hydrojoy control unit
//!
//! This crate owns the only state in the configuration portal:
//!
//! - Versioned records on the shared EEPROM
//! - Per-axis inversion tables for the joystick and the gamepad
//! - The three-point electro-valve calibration and its phase machine
//! - Request dispatch onto those components
//!
//! Output driving and the neutral-offset record live in the board
//! firmware and are reached through the traits in [`traits`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod context;
pub mod state;
pub mod store;
pub mod traits;

#[cfg(test)]
mod testing;

pub use context::ConfigContext;
