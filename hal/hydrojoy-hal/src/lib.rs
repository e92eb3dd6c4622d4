//! Hydrojoy Hardware Abstraction Layer
//!
//! Traits implemented by board-specific code so that the configuration
//! core runs unchanged on the ESP32/AVR targets and on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  hydrojoy-core (config state machine)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hydrojoy-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ board EEPROM  │       │  RamEeprom    │
//! │ (emulated in  │       │ (host, tests) │
//! │  flash)       │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`eeprom::Eeprom`] - Byte-addressed non-volatile memory

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;

pub use eeprom::{Eeprom, EepromError, RamEeprom};
