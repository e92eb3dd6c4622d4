//! Electro-valve output traits

use crate::config::ValveRange;

/// Physical valve outputs and the active control range
pub trait ValveDriver {
    /// Control range currently used to drive the valves
    fn active_range(&self) -> ValveRange;

    /// Replace the active control range
    ///
    /// The derived window is stale until
    /// [`ValveDriver::update_neutral_window`] runs.
    fn set_active_range(&mut self, range: ValveRange);

    /// Recompute the dead-zone window around neutral from the active range
    fn update_neutral_window(&mut self);

    /// Drive every output pair to neutral immediately
    fn neutralize_all_outputs(&mut self);

    /// Drive one output pair to a raw signal value
    fn apply_axis_to_pair(&mut self, axis_index: u8, raw: u16);
}

/// Persistence of the neutral offset
///
/// The neutral offset has its own record, managed by the output layer.
/// It mirrors `active_range().neutral`.
pub trait NeutralOffsetStore {
    /// Load the neutral offset into the active range
    fn load_neutral_offset(&mut self);

    /// Persist the active neutral offset
    fn save_neutral_offset(&mut self);
}
