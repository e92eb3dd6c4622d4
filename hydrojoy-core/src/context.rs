//! Configuration context
//!
//! Owns the store, both configuration tables and the output driver, and
//! runs one request to completion per call. The portal executes requests
//! one at a time, so no locking is needed.

use hydrojoy_hal::Eeprom;
use hydrojoy_protocol::{Request, Response, Status};

use crate::config::{InversionTable, LayoutError, StoreLayout, ValveCalibration};
use crate::store::{StoreError, VersionedStore};
use crate::traits::{NeutralOffsetStore, ValveDriver};

/// Process-wide configuration state
pub struct ConfigContext<E, D> {
    store: VersionedStore<E>,
    layout: StoreLayout,
    inversion: InversionTable,
    valve: ValveCalibration,
    driver: D,
}

impl<E, D> ConfigContext<E, D>
where
    E: Eeprom,
    D: ValveDriver + NeutralOffsetStore,
{
    /// Open the store and restore both configuration tables
    ///
    /// Missing or foreign records are not errors: the affected table
    /// starts from its defaults. A layout that does not fit `eeprom` is.
    pub fn boot(eeprom: E, mut driver: D, layout: StoreLayout) -> Result<Self, LayoutError> {
        layout.validate_for(eeprom.capacity())?;

        let mut store = VersionedStore::new(eeprom);
        if let Err(e) = store.open() {
            warn!("Failed to open EEPROM: {:?}, using defaults", e);
        }

        let inversion = InversionTable::load_or_default(&mut store, layout.inversion);
        let valve = ValveCalibration::load(&mut store, layout.valve, &mut driver);

        info!("Configuration restored");
        Ok(Self {
            store,
            layout,
            inversion,
            valve,
            driver,
        })
    }

    /// Parse and run a request
    pub fn handle_raw(&mut self, path: &str, query: &str) -> Response {
        match Request::parse(path, query) {
            Ok(request) => self.handle(&request),
            Err(e) => {
                debug!("Rejected request: {:?}", e);
                Response::from(e)
            }
        }
    }

    /// Run a parsed request
    pub fn handle(&mut self, request: &Request) -> Response {
        match *request {
            Request::ApplyInversion { source, flags } => {
                self.inversion.apply(source, &flags);
                Response::ok()
            }
            Request::SaveInversion { source, flags } => {
                let result = self.inversion.save(&mut self.store, source, &flags);
                Self::persisted(result)
            }
            Request::InversionState { source } => {
                let text = self.inversion.to_text(source);
                Response::new(Status::Ok, &text)
            }
            Request::StartCalibration => {
                self.valve.start(&mut self.driver);
                Response::ok()
            }
            Request::Preview { value } => {
                self.valve.preview(&mut self.driver, i32::from(value));
                Response::ok()
            }
            Request::Record { phase, value } => {
                self.valve.record(phase, i32::from(value));
                Response::ok()
            }
            Request::CommitCalibration => {
                let result = self.valve.commit(&mut self.store, &mut self.driver);
                Self::persisted(result)
            }
        }
    }

    fn persisted(result: Result<(), StoreError>) -> Response {
        match result {
            Ok(()) => Response::ok(),
            Err(_) => Response::storage_failed(),
        }
    }

    /// Inversion tables
    pub fn inversion(&self) -> &InversionTable {
        &self.inversion
    }

    /// Valve calibration
    pub fn valve(&self) -> &ValveCalibration {
        &self.valve
    }

    /// Record layout in use
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Output driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Output driver, mutably
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Tear down, returning the EEPROM and the driver
    pub fn into_parts(self) -> (E, D) {
        (self.store.into_inner(), self.driver)
    }
}
