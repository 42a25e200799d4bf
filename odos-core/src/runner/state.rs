//! Live run state machine
//!
//! The state machine is explicit, finite, and deterministic. Per-command
//! animation happens inside `Running`.

/// Live run states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// No run has started yet
    #[default]
    Idle,
    /// Commands are animating
    Running,
    /// Every command finished
    Completed,
    /// Cancelled by the user
    Stopped,
}

/// Events that trigger run state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunEvent {
    /// User pressed start
    Start,
    /// Command queue ran dry
    QueueDrained,
    /// User pressed stop
    Stop,
}

impl RunState {
    /// Check if commands are animating
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Check if this is a terminal state a new run may start from
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Stopped)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: RunEvent) -> Self {
        use RunEvent::*;
        use RunState::*;

        match (self, event) {
            (Idle | Completed | Stopped, Start) => Running,
            (Running, QueueDrained) => Completed,
            (Running, Stop) => Stopped,

            // Re-entrant start while running is guarded
            (Running, Start) => Running,

            // Everything else is ignored
            (state, _) => state,
        }
    }
}
