//! EEPROM abstractions
//!
//! Byte-addressed non-volatile memory. On targets where the EEPROM is
//! emulated in flash, writes land in a RAM shadow until [`Eeprom::commit`]
//! flushes them; on true EEPROM parts `commit` is a no-op.

/// Value of a byte that has never been written
pub const ERASED_BYTE: u8 = 0xFF;

/// Errors from EEPROM operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError {
    /// Access extends past the end of the medium
    OutOfBounds {
        /// First byte of the rejected access
        address: usize,
        /// Length of the rejected access
        len: usize,
    },
    /// The medium could not be initialised
    Begin,
    /// Flushing the shadow copy to flash failed
    Commit,
}

/// Byte-addressed non-volatile memory
///
/// Implementations must tolerate `begin` being called more than once.
pub trait Eeprom {
    /// Total number of addressable bytes
    fn capacity(&self) -> usize;

    /// Prepare the medium for access
    ///
    /// Emulated EEPROMs allocate and load their shadow copy here.
    fn begin(&mut self) -> Result<(), EepromError> {
        Ok(())
    }

    /// Read `buffer.len()` bytes starting at `address`
    fn read(&mut self, address: usize, buffer: &mut [u8]) -> Result<(), EepromError>;

    /// Write `data` starting at `address`
    ///
    /// The write may not be durable until [`Eeprom::commit`] returns.
    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), EepromError>;

    /// Make every preceding write durable
    fn commit(&mut self) -> Result<(), EepromError> {
        Ok(())
    }
}

/// RAM-backed EEPROM
///
/// Starts fully erased. Writes are staged and only become visible to
/// [`RamEeprom::durable`] after `commit`, which lets host code simulate a
/// power cut between a write and its flush.
#[derive(Debug, Clone)]
pub struct RamEeprom<const N: usize> {
    staged: [u8; N],
    durable: [u8; N],
    begin_count: u32,
    commit_count: u32,
}

impl<const N: usize> Default for RamEeprom<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamEeprom<N> {
    /// Create an erased EEPROM
    pub const fn new() -> Self {
        Self {
            staged: [ERASED_BYTE; N],
            durable: [ERASED_BYTE; N],
            begin_count: 0,
            commit_count: 0,
        }
    }

    /// Simulate a power cycle: staged writes that were never committed are lost
    pub fn power_cycle(&self) -> Self {
        Self {
            staged: self.durable,
            durable: self.durable,
            begin_count: 0,
            commit_count: 0,
        }
    }

    /// Contents that would survive a power cycle
    pub fn durable(&self) -> &[u8; N] {
        &self.durable
    }

    /// Number of times `begin` was called
    pub fn begin_count(&self) -> u32 {
        self.begin_count
    }

    /// Number of times `commit` was called
    pub fn commit_count(&self) -> u32 {
        self.commit_count
    }

    fn check(address: usize, len: usize) -> Result<(), EepromError> {
        match address.checked_add(len) {
            Some(end) if end <= N => Ok(()),
            _ => Err(EepromError::OutOfBounds { address, len }),
        }
    }
}

impl<const N: usize> Eeprom for RamEeprom<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn begin(&mut self) -> Result<(), EepromError> {
        self.begin_count += 1;
        Ok(())
    }

    fn read(&mut self, address: usize, buffer: &mut [u8]) -> Result<(), EepromError> {
        Self::check(address, buffer.len())?;
        buffer.copy_from_slice(&self.staged[address..address + buffer.len()]);
        Ok(())
    }

    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), EepromError> {
        Self::check(address, data.len())?;
        self.staged[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), EepromError> {
        self.durable = self.staged;
        self.commit_count += 1;
        Ok(())
    }
}
