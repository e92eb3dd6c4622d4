//! Versioned fixed-address records
//!
//! Record layout:
//! - MAGIC (2 bytes, little-endian): identifies the record type
//! - VERSION (2 bytes, little-endian): identifies the payload layout
//! - PAYLOAD (N bytes)
//!
//! A record is valid when its magic matches. The version is read back but
//! a mismatch is accepted as-is.

use hydrojoy_hal::{Eeprom, EepromError};

/// Size of the magic/version header in bytes
pub const HEADER_SIZE: usize = 4;

/// Header prefixed to every record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecordHeader {
    pub magic: u16,
    pub version: u16,
}

impl RecordHeader {
    /// Encode the header as stored on the medium
    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let magic = self.magic.to_le_bytes();
        let version = self.version.to_le_bytes();
        [magic[0], magic[1], version[0], version[1]]
    }

    /// Decode a header read from the medium
    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self {
            magic: u16::from_le_bytes([bytes[0], bytes[1]]),
            version: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }
}

/// Record storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// The underlying EEPROM rejected the operation
    Eeprom(EepromError),
}

impl From<EepromError> for StoreError {
    fn from(e: EepromError) -> Self {
        StoreError::Eeprom(e)
    }
}

/// Magic/version tagged records on an EEPROM
///
/// Callers are responsible for keeping record address ranges disjoint.
pub struct VersionedStore<E> {
    eeprom: E,
    opened: bool,
}

impl<E: Eeprom> VersionedStore<E> {
    /// Wrap an EEPROM; nothing is touched until the first access
    pub fn new(eeprom: E) -> Self {
        Self {
            eeprom,
            opened: false,
        }
    }

    /// Prepare the medium
    ///
    /// Only the first successful call reaches the EEPROM.
    pub fn open(&mut self) -> Result<(), StoreError> {
        if !self.opened {
            self.eeprom.begin()?;
            self.opened = true;
            debug!("EEPROM opened, {} bytes", self.eeprom.capacity());
        }
        Ok(())
    }

    /// Write a record and flush it
    pub fn write(
        &mut self,
        address: usize,
        magic: u16,
        version: u16,
        payload: &[u8],
    ) -> Result<(), StoreError> {
        self.open()?;

        let header = RecordHeader { magic, version };
        self.eeprom.write(address, &header.to_bytes())?;
        self.eeprom.write(address + HEADER_SIZE, payload)?;
        self.eeprom.commit()?;

        debug!(
            "Wrote record {=u16:#x} v{} at {} ({} bytes)",
            magic,
            version,
            address,
            payload.len()
        );
        Ok(())
    }

    /// Read a record's payload
    ///
    /// Returns `None` when the stored magic does not match or the medium
    /// could not be read; callers fall back to defaults either way.
    pub fn read<const N: usize>(
        &mut self,
        address: usize,
        magic: u16,
        version: u16,
    ) -> Option<[u8; N]> {
        match self.try_read(address, magic, version) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to read record at {}: {:?}", address, e);
                None
            }
        }
    }

    /// Read a record's payload, reporting medium errors
    pub fn try_read<const N: usize>(
        &mut self,
        address: usize,
        magic: u16,
        version: u16,
    ) -> Result<Option<[u8; N]>, StoreError> {
        let header = self.header(address)?;

        if header.magic != magic {
            debug!(
                "No record {=u16:#x} at {} (found {=u16:#x})",
                magic,
                address,
                header.magic
            );
            return Ok(None);
        }

        if header.version != version {
            debug!(
                "Record {=u16:#x} has version {}, expected {}; accepting",
                magic,
                header.version,
                version
            );
        }

        let mut payload = [0u8; N];
        self.eeprom.read(address + HEADER_SIZE, &mut payload)?;
        Ok(Some(payload))
    }

    /// Read the header stored at `address`
    pub fn header(&mut self, address: usize) -> Result<RecordHeader, StoreError> {
        self.open()?;

        let mut bytes = [0u8; HEADER_SIZE];
        self.eeprom.read(address, &mut bytes)?;
        Ok(RecordHeader::from_bytes(bytes))
    }

    /// Check whether a record with `magic` is stored at `address`
    pub fn is_valid(&mut self, address: usize, magic: u16) -> bool {
        matches!(self.header(address), Ok(header) if header.magic == magic)
    }

    /// Borrow the underlying EEPROM
    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    /// Release the underlying EEPROM
    pub fn into_inner(self) -> E {
        self.eeprom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrojoy_hal::RamEeprom;

    const MAGIC: u16 = 0xBEEF;

    #[test]
    fn test_header_layout() {
        let header = RecordHeader {
            magic: 0x1A55,
            version: 0x0001,
        };
        assert_eq!(header.to_bytes(), [0x55, 0x1A, 0x01, 0x00]);
        assert_eq!(RecordHeader::from_bytes(header.to_bytes()), header);
    }

    #[test]
    fn test_empty_medium_reads_none() {
        let mut store = VersionedStore::new(RamEeprom::<64>::new());
        assert_eq!(store.read::<4>(0, MAGIC, 1), None);
        assert!(!store.is_valid(0, MAGIC));
    }

    #[test]
    fn test_write_then_read() {
        let mut store = VersionedStore::new(RamEeprom::<64>::new());
        store.write(10, MAGIC, 1, &[1, 2, 3]).unwrap();

        assert_eq!(store.read::<3>(10, MAGIC, 1), Some([1, 2, 3]));
        assert!(store.is_valid(10, MAGIC));
    }

    #[test]
    fn test_wrong_magic_reads_none() {
        let mut store = VersionedStore::new(RamEeprom::<64>::new());
        store.write(0, MAGIC, 1, &[9]).unwrap();

        assert_eq!(store.read::<1>(0, 0x1234, 1), None);
    }

    #[test]
    fn test_version_mismatch_accepted() {
        let mut store = VersionedStore::new(RamEeprom::<64>::new());
        store.write(0, MAGIC, 7, &[5, 6]).unwrap();

        assert_eq!(store.read::<2>(0, MAGIC, 1), Some([5, 6]));
        assert_eq!(store.header(0).unwrap().version, 7);
    }

    #[test]
    fn test_write_commits() {
        let mut store = VersionedStore::new(RamEeprom::<64>::new());
        store.write(0, MAGIC, 1, &[1]).unwrap();

        let mut rebooted = VersionedStore::new(store.into_inner().power_cycle());
        assert_eq!(rebooted.read::<1>(0, MAGIC, 1), Some([1]));
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut store = VersionedStore::new(RamEeprom::<64>::new());
        store.open().unwrap();
        store.open().unwrap();
        store.write(0, MAGIC, 1, &[1]).unwrap();
        let _ = store.read::<1>(0, MAGIC, 1);

        assert_eq!(store.eeprom().begin_count(), 1);
    }

    #[test]
    fn test_out_of_bounds_write_fails() {
        let mut store = VersionedStore::new(RamEeprom::<8>::new());
        assert_eq!(
            store.write(6, MAGIC, 1, &[0; 4]),
            Err(StoreError::Eeprom(EepromError::OutOfBounds { address: 6, len: 4 }))
        );
    }

    #[test]
    fn test_out_of_bounds_read_is_none() {
        let mut store = VersionedStore::new(RamEeprom::<8>::new());
        assert_eq!(store.read::<4>(100, MAGIC, 1), None);
        assert!(store.try_read::<4>(100, MAGIC, 1).is_err());
    }
}
