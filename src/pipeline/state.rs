//! Request lifecycle states.

use std::fmt;
use tracing::{debug, warn};

/// Where a request currently is in its lifecycle.
///
/// `Idle → Validating → Detecting → Composing → Done`, with `Error`
/// reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Validating,
    Detecting,
    Composing,
    Done,
    Error,
}

impl RequestState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Whether `self → next` is a legal transition.
    pub fn can_transition_to(self, next: RequestState) -> bool {
        use RequestState::*;
        match (self, next) {
            (Idle, Validating) | (Validating, Detecting) | (Detecting, Composing) => true,
            (Composing, Done) => true,
            (from, Error) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Detecting => "detecting",
            Self::Composing => "composing",
            Self::Done => "done",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Tracks one request's state and traces every transition.
#[derive(Debug)]
pub(crate) struct RequestTracker {
    request: String,
    state: RequestState,
}

impl RequestTracker {
    pub(crate) fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            state: RequestState::Idle,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> RequestState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: RequestState) {
        if !self.state.can_transition_to(next) {
            warn!(
                "Request {}: unexpected transition {} -> {}",
                self.request, self.state, next
            );
        }
        debug!("Request {}: {} -> {}", self.request, self.state, next);
        self.state = next;
    }

    /// Moves to `Error` and hands the error back for propagation.
    pub(crate) fn fail<E: fmt::Display>(&mut self, error: E) -> E {
        warn!(
            "Request {} failed while {}: {}",
            self.request, self.state, error
        );
        self.advance(RequestState::Error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        use RequestState::*;
        let path = [Idle, Validating, Detecting, Composing, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        assert!(!Idle.can_transition_to(Composing));
        assert!(!Done.can_transition_to(Validating));
    }

    #[test]
    fn test_error_absorbs_non_terminal_states() {
        use RequestState::*;
        for state in [Idle, Validating, Detecting, Composing] {
            assert!(state.can_transition_to(Error));
        }
        assert!(!Done.can_transition_to(Error));
        assert!(!Error.can_transition_to(Error));
    }

    #[test]
    fn test_tracker_fail_returns_error() {
        let mut tracker = RequestTracker::new("P-001");
        tracker.advance(RequestState::Validating);
        let message = tracker.fail("bad id");
        assert_eq!(message, "bad id");
        assert_eq!(tracker.state(), RequestState::Error);
    }
}
