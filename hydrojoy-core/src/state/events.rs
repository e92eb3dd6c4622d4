//! Calibration events

/// Events that drive [`super::Phase`] transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationEvent {
    /// Outputs neutralized, run begins
    Start,
    /// A value was held for the given phase index
    Record(i32),
    /// Held values activated and persisted
    Commit,
}
