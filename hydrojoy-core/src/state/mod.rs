//! Calibration phase machine
//!
//! Tracks where the operator is in a valve calibration run. The phase is
//! advisory: it never blocks a record or a commit.

pub mod events;
pub mod machine;

pub use events::CalibrationEvent;
pub use machine::Phase;
