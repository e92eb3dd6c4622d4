//! Test doubles

use hydrojoy_hal::{Eeprom, EepromError, RamEeprom};

use crate::config::ValveRange;
use crate::traits::{NeutralOffsetStore, ValveDriver};

/// Output layer that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    pub active: ValveRange,
    pub neutralize_count: u32,
    pub window_updates: u32,
    pub previews: Vec<(u8, u16)>,
    pub offset_loads: u32,
    pub offset_saves: u32,
    /// Neutral offset in its own record; `None` until first saved
    pub stored_offset: Option<u16>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver after a power cycle: only the separately stored offset survives
    pub fn rebooted(&self) -> Self {
        Self {
            stored_offset: self.stored_offset,
            ..Self::default()
        }
    }
}

impl ValveDriver for RecordingDriver {
    fn active_range(&self) -> ValveRange {
        self.active
    }

    fn set_active_range(&mut self, range: ValveRange) {
        self.active = range;
    }

    fn update_neutral_window(&mut self) {
        self.window_updates += 1;
    }

    fn neutralize_all_outputs(&mut self) {
        self.neutralize_count += 1;
    }

    fn apply_axis_to_pair(&mut self, axis_index: u8, raw: u16) {
        self.previews.push((axis_index, raw));
    }
}

impl NeutralOffsetStore for RecordingDriver {
    fn load_neutral_offset(&mut self) {
        self.offset_loads += 1;
        if let Some(offset) = self.stored_offset {
            self.active.neutral = offset;
        }
    }

    fn save_neutral_offset(&mut self) {
        self.offset_saves += 1;
        self.stored_offset = Some(self.active.neutral);
    }
}

/// Full-size EEPROM whose flush always fails
#[derive(Debug, Clone, Default)]
pub struct FailingEeprom {
    inner: RamEeprom<512>,
}

impl Eeprom for FailingEeprom {
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn read(&mut self, address: usize, buffer: &mut [u8]) -> Result<(), EepromError> {
        self.inner.read(address, buffer)
    }

    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), EepromError> {
        self.inner.write(address, data)
    }

    fn commit(&mut self) -> Result<(), EepromError> {
        Err(EepromError::Commit)
    }
}
