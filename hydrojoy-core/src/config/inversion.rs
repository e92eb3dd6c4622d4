//! Axis inversion tables
//!
//! One flag per logical axis for each input source. A set flag flips the
//! sign of that axis before it reaches the outputs.

use core::iter;

use heapless::String;
use hydrojoy_hal::Eeprom;
use hydrojoy_protocol::{InputSource, AXIS_COUNT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::layout::RecordSlot;
use crate::store::{StoreError, VersionedStore};

/// Payload size: joystick flags then pad flags, one byte each
pub const INVERSION_PAYLOAD_SIZE: usize = 2 * AXIS_COUNT;

/// Length of the comma-separated flag list, e.g. `"0,0,1,0,0,0,0,0"`
pub const FLAGS_TEXT_SIZE: usize = 2 * AXIS_COUNT - 1;

/// Logical control axes, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
    Lx = 3,
    Ly = 4,
    Lz = 5,
    R1 = 6,
    R2 = 7,
}

impl Axis {
    /// Every axis in index order
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::X,
        Axis::Y,
        Axis::Z,
        Axis::Lx,
        Axis::Ly,
        Axis::Lz,
        Axis::R1,
        Axis::R2,
    ];

    /// Position in the inversion tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Axis at a table position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Label shown in the portal
    pub const fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::Lx => "LX",
            Axis::Ly => "LY",
            Axis::Lz => "LZ",
            Axis::R1 => "R1",
            Axis::R2 => "R2",
        }
    }
}

/// Inversion flags for both input sources
///
/// Both tables always hold a value for every axis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InversionTable {
    joystick: [bool; AXIS_COUNT],
    pad: [bool; AXIS_COUNT],
    slot: RecordSlot,
}

impl InversionTable {
    /// Factory tables: only the joystick Z axis is inverted
    pub fn defaults(slot: RecordSlot) -> Self {
        let mut joystick = [false; AXIS_COUNT];
        joystick[Axis::Z.index()] = true;

        Self {
            joystick,
            pad: [false; AXIS_COUNT],
            slot,
        }
    }

    /// Load the tables from their record, or fall back to defaults
    pub fn load_or_default<E: Eeprom>(store: &mut VersionedStore<E>, slot: RecordSlot) -> Self {
        match store.read::<INVERSION_PAYLOAD_SIZE>(slot.offset(), slot.magic, slot.version) {
            Some(payload) => {
                let table = Self::from_payload(&payload, slot);
                info!(
                    "Loaded inversion tables: joy={} pad={}",
                    table.joystick,
                    table.pad
                );
                table
            }
            None => {
                debug!("No inversion record, using defaults");
                Self::defaults(slot)
            }
        }
    }

    /// Replace one source's table in memory
    ///
    /// Missing trailing values are `false`; values past the eighth are
    /// ignored.
    pub fn apply(&mut self, source: InputSource, values: &[bool]) {
        let table = self.flags_mut(source);
        for (i, flag) in table.iter_mut().enumerate() {
            *flag = values.get(i).copied().unwrap_or(false);
        }
        info!("Applied inversion for {}: {}", source.as_wire(), *table);
    }

    /// Replace one source's table and persist both tables
    pub fn save<E: Eeprom>(
        &mut self,
        store: &mut VersionedStore<E>,
        source: InputSource,
        values: &[bool],
    ) -> Result<(), StoreError> {
        self.apply(source, values);
        self.persist(store)
    }

    /// Write both tables to their record
    pub fn persist<E: Eeprom>(&self, store: &mut VersionedStore<E>) -> Result<(), StoreError> {
        store.write(
            self.slot.offset(),
            self.slot.magic,
            self.slot.version,
            &self.to_payload(),
        )?;
        info!("Saved inversion tables");
        Ok(())
    }

    /// Flags for one source, indexed by [`Axis::index`]
    pub fn flags(&self, source: InputSource) -> &[bool; AXIS_COUNT] {
        match source {
            InputSource::Joystick => &self.joystick,
            InputSource::Pad => &self.pad,
        }
    }

    fn flags_mut(&mut self, source: InputSource) -> &mut [bool; AXIS_COUNT] {
        match source {
            InputSource::Joystick => &mut self.joystick,
            InputSource::Pad => &mut self.pad,
        }
    }

    /// Check whether an axis is inverted for a source
    pub fn is_inverted(&self, source: InputSource, axis: Axis) -> bool {
        self.flags(source)[axis.index()]
    }

    /// Apply a source's inversion to a centred axis value
    pub fn apply_to(&self, source: InputSource, axis: Axis, value: i16) -> i16 {
        if self.is_inverted(source, axis) {
            value.saturating_neg()
        } else {
            value
        }
    }

    /// Flags of one source as the portal's `0,1,...` list
    pub fn to_text(&self, source: InputSource) -> String<FLAGS_TEXT_SIZE> {
        // One digit per axis plus a separator between each pair fills
        // FLAGS_TEXT_SIZE exactly.
        self.flags(source)
            .iter()
            .enumerate()
            .flat_map(|(i, flag)| {
                let separator = (i > 0).then_some(',');
                let digit = if *flag { '1' } else { '0' };
                separator.into_iter().chain(iter::once(digit))
            })
            .collect()
    }

    /// Encode both tables, joystick first
    pub fn to_payload(&self) -> [u8; INVERSION_PAYLOAD_SIZE] {
        let mut payload = [0u8; INVERSION_PAYLOAD_SIZE];
        let (joy, pad) = payload.split_at_mut(AXIS_COUNT);
        for (byte, flag) in joy.iter_mut().zip(self.joystick) {
            *byte = u8::from(flag);
        }
        for (byte, flag) in pad.iter_mut().zip(self.pad) {
            *byte = u8::from(flag);
        }
        payload
    }

    /// Decode a stored payload; any nonzero byte is a set flag
    pub fn from_payload(payload: &[u8; INVERSION_PAYLOAD_SIZE], slot: RecordSlot) -> Self {
        let mut joystick = [false; AXIS_COUNT];
        let mut pad = [false; AXIS_COUNT];
        for i in 0..AXIS_COUNT {
            joystick[i] = payload[i] != 0;
            pad[i] = payload[AXIS_COUNT + i] != 0;
        }
        Self {
            joystick,
            pad,
            slot,
        }
    }
}
