//! Configuration types
//!
//! Persisted configuration tables and the EEPROM layout they occupy.

pub mod inversion;
pub mod layout;
pub mod valve;

pub use inversion::{Axis, InversionTable};
pub use layout::{LayoutError, RecordSlot, StoreLayout};
pub use valve::{ValveCalibration, ValveRange, PREVIEW_AXIS};
