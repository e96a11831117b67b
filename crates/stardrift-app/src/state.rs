//! Application lifecycle state.

/// The flythrough's run state. Transitions are one-way: once stopped, the
/// loop never resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Stopped,
}

impl LoopState {
    /// Stop the loop. Idempotent; there is no way back to `Running`.
    pub fn stop(&mut self) {
        *self = LoopState::Stopped;
    }

    /// Returns `true` while the loop should keep ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_running() {
        assert!(LoopState::default().is_running());
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut state = LoopState::default();
        state.stop();
        assert!(!state.is_running());
        // A second stop changes nothing.
        state.stop();
        assert!(!state.is_running());
    }
}
