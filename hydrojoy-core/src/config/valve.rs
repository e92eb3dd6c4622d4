//! Electro-valve calibration
//!
//! Three raw signal points define the valve drive range. A calibration
//! run holds operator-chosen values in a working copy; nothing reaches the
//! outputs or the EEPROM until [`ValveCalibration::commit`], so an
//! abandoned or interrupted run leaves the last good calibration intact.

use hydrojoy_hal::Eeprom;
use hydrojoy_protocol::clamp_raw;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::layout::RecordSlot;
use crate::state::machine::{PHASE_MAX, PHASE_MIN, PHASE_NEUTRAL};
use crate::state::{CalibrationEvent, Phase};
use crate::store::{StoreError, VersionedStore};
use crate::traits::{NeutralOffsetStore, ValveDriver};

/// Payload size: neutral, min, max as little-endian `u16`
pub const VALVE_PAYLOAD_SIZE: usize = 6;

/// Output pair driven by [`ValveCalibration::preview`]
pub const PREVIEW_AXIS: u8 = 0;

/// Valve control points in raw signal units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValveRange {
    /// Rest position
    pub neutral: u16,
    /// Travel minimum
    pub min: u16,
    /// Travel maximum
    pub max: u16,
}

impl Default for ValveRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ValveRange {
    /// Factory range
    pub const DEFAULT: Self = Self {
        neutral: 512,
        min: 255,
        max: 768,
    };

    /// Check `min <= neutral <= max`
    pub fn is_ordered(&self) -> bool {
        self.min <= self.neutral && self.neutral <= self.max
    }

    /// Encode as stored on the medium
    pub fn to_payload(&self) -> [u8; VALVE_PAYLOAD_SIZE] {
        let n = self.neutral.to_le_bytes();
        let lo = self.min.to_le_bytes();
        let hi = self.max.to_le_bytes();
        [n[0], n[1], lo[0], lo[1], hi[0], hi[1]]
    }

    /// Decode a stored payload
    pub fn from_payload(payload: &[u8; VALVE_PAYLOAD_SIZE]) -> Self {
        Self {
            neutral: u16::from_le_bytes([payload[0], payload[1]]),
            min: u16::from_le_bytes([payload[2], payload[3]]),
            max: u16::from_le_bytes([payload[4], payload[5]]),
        }
    }
}

/// Valve calibration workflow
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValveCalibration {
    working: ValveRange,
    phase: Phase,
    /// Phases recorded since the last start
    recorded: [bool; 3],
    slot: RecordSlot,
}

impl ValveCalibration {
    /// Calibration with factory working values and no run in progress
    pub fn new(slot: RecordSlot) -> Self {
        Self {
            working: ValveRange::DEFAULT,
            phase: Phase::Idle,
            recorded: [false; 3],
            slot,
        }
    }

    /// Restore the calibration at boot
    ///
    /// Loads the neutral offset first. A stored record becomes the active
    /// range; otherwise the working values are seeded from whatever range
    /// is already active. The neutral window is recomputed either way.
    pub fn load<E, D>(store: &mut VersionedStore<E>, slot: RecordSlot, driver: &mut D) -> Self
    where
        E: Eeprom,
        D: ValveDriver + NeutralOffsetStore,
    {
        driver.load_neutral_offset();

        let mut calibration = Self::new(slot);
        match store.read::<VALVE_PAYLOAD_SIZE>(slot.offset(), slot.magic, slot.version) {
            Some(payload) => {
                calibration.working = ValveRange::from_payload(&payload);
                driver.set_active_range(calibration.working);
                info!("Loaded valve calibration: {}", calibration.working);
            }
            None => {
                calibration.working = driver.active_range();
                debug!("No valve calibration record, keeping active range");
            }
        }

        driver.update_neutral_window();
        calibration
    }

    /// Begin a run: neutralize every output
    ///
    /// Working values are left as they are.
    pub fn start<D: ValveDriver>(&mut self, driver: &mut D) {
        driver.neutralize_all_outputs();
        self.phase = self.phase.transition(CalibrationEvent::Start);
        self.recorded = [false; 3];
        info!("Valve calibration started, outputs neutralized");
    }

    /// Drive the preview output to a clamped raw value
    pub fn preview<D: ValveDriver>(&self, driver: &mut D, raw: i32) {
        driver.apply_axis_to_pair(PREVIEW_AXIS, clamp_raw(raw));
    }

    /// Hold a clamped raw value for a phase
    ///
    /// Phase 0 is neutral, 1 is min, 2 is max; other indices are ignored.
    /// Phases may be recorded in any order and more than once.
    pub fn record(&mut self, phase: i32, raw: i32) {
        let value = clamp_raw(raw);
        let target = match phase {
            PHASE_NEUTRAL => &mut self.working.neutral,
            PHASE_MIN => &mut self.working.min,
            PHASE_MAX => &mut self.working.max,
            _ => {
                debug!("Ignoring record for phase {}", phase);
                return;
            }
        };
        *target = value;

        if let Some(seen) = self.recorded.get_mut(phase as usize) {
            *seen = true;
        }
        if let Some(expected) = self.phase.expected_index() {
            if expected != phase {
                debug!("Recorded phase {} while awaiting {}", phase, expected);
            }
        }
        self.phase = self.phase.transition(CalibrationEvent::Record(phase));
        info!("Recorded phase {} = {}", phase, value);
    }

    /// Activate and persist the working values
    ///
    /// Commits whatever is held, even when the points are out of order or
    /// a phase was never recorded in this run. The neutral offset is saved
    /// even if the record write fails.
    pub fn commit<E, D>(
        &mut self,
        store: &mut VersionedStore<E>,
        driver: &mut D,
    ) -> Result<(), StoreError>
    where
        E: Eeprom,
        D: ValveDriver + NeutralOffsetStore,
    {
        if !self.working.is_ordered() {
            warn!(
                "Committing unordered valve range: min={} neutral={} max={}",
                self.working.min,
                self.working.neutral,
                self.working.max
            );
        }
        if !self.is_complete() {
            warn!("Committing valve calibration with unrecorded phases");
        }

        driver.set_active_range(self.working);
        driver.update_neutral_window();

        let result = store.write(
            self.slot.offset(),
            self.slot.magic,
            self.slot.version,
            &self.working.to_payload(),
        );
        driver.save_neutral_offset();

        self.phase = self.phase.transition(CalibrationEvent::Commit);
        self.recorded = [false; 3];

        match result {
            Ok(()) => info!("Saved valve calibration: {}", self.working),
            Err(e) => warn!("Failed to save valve calibration: {:?}", e),
        }
        result
    }

    /// Values held for the next commit
    pub fn working(&self) -> ValveRange {
        self.working
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check whether all three phases were recorded since the last start
    pub fn is_complete(&self) -> bool {
        self.recorded.iter().all(|seen| *seen)
    }
}
