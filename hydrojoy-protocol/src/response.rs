//! Plain-text responses

use heapless::String;

use crate::request::RequestError;

/// Maximum response body size in bytes
pub const MAX_BODY_SIZE: usize = 32;

/// Outcome of a request, mapped onto an HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Operation completed
    Ok,
    /// A required parameter was missing
    BadRequest,
    /// No operation at this path
    NotFound,
    /// The in-memory change was made but could not be persisted
    StorageFailed,
}

impl Status {
    /// HTTP status code
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::StorageFailed => 500,
        }
    }
}

/// A `text/plain` response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub body: String<MAX_BODY_SIZE>,
}

impl Response {
    /// Create a response, truncating the body to [`MAX_BODY_SIZE`]
    pub fn new(status: Status, body: &str) -> Self {
        let mut text = String::new();
        for c in body.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        Self { status, body: text }
    }

    /// Plain `OK`
    pub fn ok() -> Self {
        Self::new(Status::Ok, "OK")
    }

    /// Persistence failure after the in-memory update
    pub fn storage_failed() -> Self {
        Self::new(Status::StorageFailed, "storage")
    }

    /// Whether the status is a success
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

impl From<RequestError> for Response {
    fn from(e: RequestError) -> Self {
        match e {
            RequestError::MissingParameter(_) => Self::new(Status::BadRequest, "missing"),
            RequestError::UnknownRoute => Self::new(Status::NotFound, "not found"),
        }
    }
}
