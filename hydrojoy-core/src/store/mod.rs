//! Non-volatile record storage
//!
//! Records live at fixed EEPROM addresses behind a magic/version header.

pub mod versioned;

pub use versioned::{RecordHeader, StoreError, VersionedStore, HEADER_SIZE};
