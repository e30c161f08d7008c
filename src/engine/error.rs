//! Dispatch errors.

use crate::core::{Event, State};
use thiserror::Error;

/// Error type returned by transition callbacks.
pub type ActionError = anyhow::Error;

/// Errors that can occur while dispatching an event.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No transition: from {from} event {event}")]
    NoTransition { from: String, event: String },

    /// The transition's callback failed. Carries the callback's own error.
    #[error(transparent)]
    Action(ActionError),

    #[error("dispatch is not supported by a synchronous machine, use sync_dispatch")]
    Unsupported,

    /// A callback panicked, or the machine went away before the event
    /// was matched.
    #[error("dispatch aborted: {0}")]
    Aborted(String),
}

impl DispatchError {
    pub(crate) fn no_transition<S: State, E: Event>(from: &S, event: &E) -> Self {
        Self::NoTransition {
            from: from.name().to_string(),
            event: event.name().to_string(),
        }
    }

    pub fn is_no_transition(&self) -> bool {
        matches!(self, Self::NoTransition { .. })
    }

    /// The callback error, if this dispatch failed inside a callback.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            Self::Action(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_transition_message_names_state_and_event() {
        let err = DispatchError::no_transition(&"broken".to_string(), &"open".to_string());
        assert_eq!(err.to_string(), "No transition: from broken event open");
        assert!(err.is_no_transition());
        assert!(err.action_error().is_none());
    }

    #[test]
    fn action_error_displays_transparently() {
        let err = DispatchError::Action(anyhow::anyhow!("bad key"));
        assert_eq!(err.to_string(), "bad key");
        assert!(!err.is_no_transition());
        assert_eq!(err.action_error().unwrap().to_string(), "bad key");
    }
}
