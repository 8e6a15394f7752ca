use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle phase of a [`Runner`](super::Runner).
///
/// Transitions flow one way: `Created → Starting → Running → Stopping →
/// Stopped`. `Stopped` is terminal; a runner never returns to `Running`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RunnerState {
    Created = 0,
    Starting = 1,
    Running = 2,
    Stopping = 3,
    Stopped = 4,
}

impl RunnerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => RunnerState::Created,
            1 => RunnerState::Starting,
            2 => RunnerState::Running,
            3 => RunnerState::Stopping,
            _ => RunnerState::Stopped,
        }
    }
}

/// Atomic cell holding a [`RunnerState`].
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(RunnerState::Created as u8))
    }

    pub fn get(&self) -> RunnerState {
        RunnerState::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub fn set(&self, state: RunnerState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }

    /// Move from `from` to `to`; false when the current state is not `from`.
    pub fn transition(&self, from: RunnerState, to: RunnerState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}
