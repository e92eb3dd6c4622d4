//! EEPROM layout
//!
//! The inversion and valve records share the EEPROM with the joystick
//! calibration and axis limits written by other parts of the firmware,
//! which sit below address 292.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::inversion::INVERSION_PAYLOAD_SIZE;
use super::valve::VALVE_PAYLOAD_SIZE;
use crate::store::HEADER_SIZE;

/// Size of the emulated EEPROM on ESP32 boards
pub const EEPROM_SIZE: u16 = 512;

/// Magic number of the inversion record
pub const INVERSION_MAGIC: u16 = 0x1A55;

/// Current inversion record version
pub const INVERSION_VERSION: u16 = 0x0001;

/// Start of the inversion record
pub const INVERSION_ADDR: u16 = 292;

/// Magic number of the valve calibration record
pub const VALVE_MAGIC: u16 = 0xE1A1;

/// Current valve calibration record version
pub const VALVE_VERSION: u16 = 0x0001;

/// Start of the valve calibration record
pub const VALVE_ADDR: u16 = 312;

/// Location and identity of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordSlot {
    /// First byte of the header
    pub address: u16,
    /// Magic number identifying the record type
    pub magic: u16,
    /// Payload layout version written with the record
    pub version: u16,
    /// Payload length in bytes
    pub payload_len: u16,
}

impl RecordSlot {
    /// Header address as a medium offset
    pub fn offset(&self) -> usize {
        usize::from(self.address)
    }

    /// One past the last byte of the record
    pub fn end(&self) -> usize {
        self.offset() + HEADER_SIZE + usize::from(self.payload_len)
    }

    /// Check whether two records share any byte
    pub fn overlaps(&self, other: &RecordSlot) -> bool {
        self.offset() < other.end() && other.offset() < self.end()
    }
}

/// Layout validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// A record extends past the end of the EEPROM
    OutOfBounds { magic: u16 },
    /// Two records share bytes
    Overlap,
    /// Two records use the same magic number
    DuplicateMagic,
    /// A record's declared payload length differs from what is written
    PayloadSize { magic: u16, expected: u16 },
    /// The layout claims more bytes than the medium provides
    ExceedsMedium { eeprom_size: u16, capacity: usize },
}

/// Where each configuration record lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StoreLayout {
    /// Usable EEPROM size in bytes
    pub eeprom_size: u16,
    /// Inversion tables record
    pub inversion: RecordSlot,
    /// Valve calibration record
    pub valve: RecordSlot,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl StoreLayout {
    /// Layout used by the shipped firmware
    pub const DEFAULT: Self = Self {
        eeprom_size: EEPROM_SIZE,
        inversion: RecordSlot {
            address: INVERSION_ADDR,
            magic: INVERSION_MAGIC,
            version: INVERSION_VERSION,
            payload_len: INVERSION_PAYLOAD_SIZE as u16,
        },
        valve: RecordSlot {
            address: VALVE_ADDR,
            magic: VALVE_MAGIC,
            version: VALVE_VERSION,
            payload_len: VALVE_PAYLOAD_SIZE as u16,
        },
    };

    /// Check that every record fits and no two records collide
    pub fn validate(&self) -> Result<(), LayoutError> {
        let payloads = [
            (&self.inversion, INVERSION_PAYLOAD_SIZE),
            (&self.valve, VALVE_PAYLOAD_SIZE),
        ];
        for (slot, size) in payloads {
            if usize::from(slot.payload_len) != size {
                return Err(LayoutError::PayloadSize {
                    magic: slot.magic,
                    expected: size as u16,
                });
            }
        }

        for slot in [&self.inversion, &self.valve] {
            if slot.end() > usize::from(self.eeprom_size) {
                return Err(LayoutError::OutOfBounds { magic: slot.magic });
            }
        }

        if self.inversion.magic == self.valve.magic {
            return Err(LayoutError::DuplicateMagic);
        }

        if self.inversion.overlaps(&self.valve) {
            return Err(LayoutError::Overlap);
        }

        Ok(())
    }

    /// Validate the layout and check it fits a medium of `capacity` bytes
    pub fn validate_for(&self, capacity: usize) -> Result<(), LayoutError> {
        self.validate()?;

        if usize::from(self.eeprom_size) > capacity {
            return Err(LayoutError::ExceedsMedium {
                eeprom_size: self.eeprom_size,
                capacity,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_valid() {
        assert_eq!(StoreLayout::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_addresses() {
        let layout = StoreLayout::DEFAULT;
        assert_eq!(layout.inversion.end(), 312);
        assert_eq!(layout.valve.offset(), 312);
        assert_eq!(layout.valve.end(), 322);
    }

    #[test]
    fn test_overlap_detected() {
        let mut layout = StoreLayout::DEFAULT;
        layout.valve.address = 300;
        assert_eq!(layout.validate(), Err(LayoutError::Overlap));
    }

    #[test]
    fn test_out_of_bounds_detected() {
        let mut layout = StoreLayout::DEFAULT;
        layout.eeprom_size = 320;
        assert_eq!(
            layout.validate(),
            Err(LayoutError::OutOfBounds { magic: VALVE_MAGIC })
        );
    }

    #[test]
    fn test_payload_len_must_match_record() {
        let mut layout = StoreLayout::DEFAULT;
        layout.inversion.payload_len = 8;
        assert_eq!(
            layout.validate(),
            Err(LayoutError::PayloadSize {
                magic: INVERSION_MAGIC,
                expected: 16,
            })
        );

        let mut layout = StoreLayout::DEFAULT;
        layout.valve.payload_len = 12;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::PayloadSize { magic: VALVE_MAGIC, .. })
        ));
    }

    #[test]
    fn test_layout_larger_than_medium() {
        assert_eq!(
            StoreLayout::DEFAULT.validate_for(300),
            Err(LayoutError::ExceedsMedium {
                eeprom_size: EEPROM_SIZE,
                capacity: 300,
            })
        );
        assert_eq!(StoreLayout::DEFAULT.validate_for(512), Ok(()));
        assert_eq!(StoreLayout::DEFAULT.validate_for(4096), Ok(()));
    }

    #[test]
    fn test_duplicate_magic_detected() {
        let mut layout = StoreLayout::DEFAULT;
        layout.valve.magic = INVERSION_MAGIC;
        assert_eq!(layout.validate(), Err(LayoutError::DuplicateMagic));
    }
}
