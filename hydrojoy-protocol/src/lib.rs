//! Configuration portal request surface
//!
//! The web portal forwards each configuration request as a path plus an
//! ASCII query string. This crate turns that pair into a typed
//! [`Request`] and describes the plain-text [`Response`] sent back.
//!
//! # Routes
//! ```text
//! /invapply      mode=joy|pad  v=<8 comma-separated 0/1>
//! /invsave       mode=joy|pad  v=<8 comma-separated 0/1>
//! /invstate      mode=joy|pad
//! /calev/start
//! /calev/set     v=<0..1023>
//! /calev/record  phase=<0|1|2>  val=<0..1023>
//! /calev/save
//! ```
//!
//! Numeric parameters never fail to parse: malformed text reads as zero.
//! A missing parameter rejects the whole request.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod parse;
pub mod query;
pub mod request;
pub mod response;

pub use parse::{clamp_raw, parse_flags, parse_int_or_zero, AXIS_COUNT, RAW_MAX};
pub use query::QueryParams;
pub use request::{InputSource, Request, RequestError};
pub use response::{Response, Status};
