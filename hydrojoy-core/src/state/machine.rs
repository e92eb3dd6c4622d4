//! Phase definition

use super::events::CalibrationEvent;

/// Phase index recording the neutral point
pub const PHASE_NEUTRAL: i32 = 0;
/// Phase index recording the minimum
pub const PHASE_MIN: i32 = 1;
/// Phase index recording the maximum
pub const PHASE_MAX: i32 = 2;

/// Calibration phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No run in progress
    #[default]
    Idle,
    /// Outputs neutralized, waiting for the neutral point
    AwaitingNeutral,
    /// Waiting for the minimum
    AwaitingMin,
    /// Waiting for the maximum
    AwaitingMax,
    /// All three points held
    ReadyToCommit,
}

impl Phase {
    /// Check whether a calibration run is in progress
    pub fn is_running(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Phase index the operator is expected to record next
    pub fn expected_index(&self) -> Option<i32> {
        match self {
            Phase::AwaitingNeutral => Some(PHASE_NEUTRAL),
            Phase::AwaitingMin => Some(PHASE_MIN),
            Phase::AwaitingMax => Some(PHASE_MAX),
            Phase::Idle | Phase::ReadyToCommit => None,
        }
    }

    /// Process an event and return the next phase
    ///
    /// A record during a run moves to the phase after the recorded index,
    /// whatever the current phase. Outside a run, records leave the phase
    /// at `Idle`.
    pub fn transition(self, event: CalibrationEvent) -> Self {
        use CalibrationEvent::*;
        use Phase::*;

        match (self, event) {
            (_, Start) => AwaitingNeutral,
            (_, Commit) => Idle,

            (Idle, Record(_)) => Idle,
            (_, Record(PHASE_NEUTRAL)) => AwaitingMin,
            (_, Record(PHASE_MIN)) => AwaitingMax,
            (_, Record(PHASE_MAX)) => ReadyToCommit,

            // Unknown phase index
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_run() {
        let phase = Phase::Idle
            .transition(CalibrationEvent::Start)
            .transition(CalibrationEvent::Record(0))
            .transition(CalibrationEvent::Record(1))
            .transition(CalibrationEvent::Record(2));
        assert_eq!(phase, Phase::ReadyToCommit);
        assert_eq!(phase.transition(CalibrationEvent::Commit), Phase::Idle);
    }

    #[test]
    fn test_start_restarts_from_any_phase() {
        let phases = [
            Phase::Idle,
            Phase::AwaitingMin,
            Phase::AwaitingMax,
            Phase::ReadyToCommit,
        ];

        for phase in phases {
            assert_eq!(
                phase.transition(CalibrationEvent::Start),
                Phase::AwaitingNeutral
            );
        }
    }

    #[test]
    fn test_out_of_order_record_follows_index() {
        let phase = Phase::AwaitingNeutral.transition(CalibrationEvent::Record(2));
        assert_eq!(phase, Phase::ReadyToCommit);

        let phase = phase.transition(CalibrationEvent::Record(0));
        assert_eq!(phase, Phase::AwaitingMin);
    }

    #[test]
    fn test_unknown_index_ignored() {
        assert_eq!(
            Phase::AwaitingMin.transition(CalibrationEvent::Record(3)),
            Phase::AwaitingMin
        );
        assert_eq!(
            Phase::AwaitingMin.transition(CalibrationEvent::Record(-1)),
            Phase::AwaitingMin
        );
    }

    #[test]
    fn test_record_while_idle_stays_idle() {
        assert_eq!(
            Phase::Idle.transition(CalibrationEvent::Record(0)),
            Phase::Idle
        );
        assert!(!Phase::Idle.is_running());
    }

    #[test]
    fn test_commit_from_partial_run() {
        assert_eq!(
            Phase::AwaitingMin.transition(CalibrationEvent::Commit),
            Phase::Idle
        );
    }

    #[test]
    fn test_expected_index() {
        assert_eq!(Phase::AwaitingNeutral.expected_index(), Some(0));
        assert_eq!(Phase::AwaitingMax.expected_index(), Some(2));
        assert_eq!(Phase::ReadyToCommit.expected_index(), None);
    }
}
