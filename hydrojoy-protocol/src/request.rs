//! Typed configuration requests
//!
//! One [`Request`] variant per portal operation. Parsing checks that every
//! required parameter is present before anything else happens, so a
//! rejected request never reaches the configuration state.

use crate::parse::{clamp_raw, parse_flags, parse_int_or_zero, AXIS_COUNT};
use crate::query::QueryParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const ROUTE_INVERSION_APPLY: &str = "/invapply";
pub const ROUTE_INVERSION_SAVE: &str = "/invsave";
pub const ROUTE_INVERSION_STATE: &str = "/invstate";
pub const ROUTE_CALIBRATION_START: &str = "/calev/start";
pub const ROUTE_CALIBRATION_PREVIEW: &str = "/calev/set";
pub const ROUTE_CALIBRATION_RECORD: &str = "/calev/record";
pub const ROUTE_CALIBRATION_COMMIT: &str = "/calev/save";

/// Input device whose inversion table is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputSource {
    /// Wired joystick
    Joystick,
    /// Wireless gamepad
    Pad,
}

impl InputSource {
    /// Decode the `mode` parameter
    ///
    /// Only `"joy"` selects the joystick; any other text selects the pad.
    pub fn from_wire(mode: &str) -> Self {
        if mode == "joy" {
            InputSource::Joystick
        } else {
            InputSource::Pad
        }
    }

    /// The `mode` parameter value for this source
    pub fn as_wire(self) -> &'static str {
        match self {
            InputSource::Joystick => "joy",
            InputSource::Pad => "pad",
        }
    }
}

/// Reasons a request is rejected before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// A required query parameter was absent
    MissingParameter(&'static str),
    /// The path does not name a configuration operation
    UnknownRoute,
}

/// A fully parsed configuration request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Replace an inversion table in memory only
    ApplyInversion {
        source: InputSource,
        flags: [bool; AXIS_COUNT],
    },
    /// Replace an inversion table and persist both tables
    SaveInversion {
        source: InputSource,
        flags: [bool; AXIS_COUNT],
    },
    /// Report the current inversion table of one source
    InversionState { source: InputSource },
    /// Neutralize all outputs ahead of a calibration run
    StartCalibration,
    /// Drive the preview output to a raw value
    Preview { value: u16 },
    /// Hold a raw value for one calibration phase
    Record { phase: i32, value: u16 },
    /// Activate and persist the held calibration values
    CommitCalibration,
}

impl Request {
    /// Parse a request from its path and query string
    pub fn parse(path: &str, query: &str) -> Result<Self, RequestError> {
        let query = QueryParams::new(query);

        match path {
            ROUTE_INVERSION_APPLY => {
                let (source, flags) = inversion_params(&query)?;
                Ok(Request::ApplyInversion { source, flags })
            }
            ROUTE_INVERSION_SAVE => {
                let (source, flags) = inversion_params(&query)?;
                Ok(Request::SaveInversion { source, flags })
            }
            ROUTE_INVERSION_STATE => {
                let mode = required(&query, "mode")?;
                Ok(Request::InversionState {
                    source: InputSource::from_wire(mode),
                })
            }
            ROUTE_CALIBRATION_START => Ok(Request::StartCalibration),
            ROUTE_CALIBRATION_PREVIEW => {
                let value = required(&query, "v")?;
                Ok(Request::Preview {
                    value: clamp_raw(parse_int_or_zero(value)),
                })
            }
            ROUTE_CALIBRATION_RECORD => {
                let phase = required(&query, "phase")?;
                let value = required(&query, "val")?;
                Ok(Request::Record {
                    phase: parse_int_or_zero(phase),
                    value: clamp_raw(parse_int_or_zero(value)),
                })
            }
            ROUTE_CALIBRATION_COMMIT => Ok(Request::CommitCalibration),
            _ => Err(RequestError::UnknownRoute),
        }
    }
}

fn required<'a>(query: &QueryParams<'a>, name: &'static str) -> Result<&'a str, RequestError> {
    query.get(name).ok_or(RequestError::MissingParameter(name))
}

fn inversion_params(
    query: &QueryParams<'_>,
) -> Result<(InputSource, [bool; AXIS_COUNT]), RequestError> {
    let mode = required(query, "mode")?;
    let values = required(query, "v")?;
    Ok((InputSource::from_wire(mode), parse_flags(values)))
}
