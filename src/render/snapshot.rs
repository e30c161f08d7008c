//! Serializable view of a machine for external tooling.
//!
//! A snapshot lists the machine's edges and where it currently stands. It
//! does not carry callbacks, so it cannot be turned back into a machine.

use crate::core::{Event, State, TransitionTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),
}

/// One transition of the table, without its callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EdgeSnapshot<S: State, E: Event> {
    pub from: S,
    pub event: E,
    pub to: S,
    /// Whether the transition runs a callback
    pub has_action: bool,
}

/// Point-in-time view of a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineSnapshot<S: State, E: Event> {
    /// State the machine was created in
    pub initial: S,

    /// State at the time of capture
    pub current: S,

    /// Transitions in table order
    pub transitions: Vec<EdgeSnapshot<S, E>>,

    /// States that are entered but never left
    pub terminal_states: Vec<S>,
}

impl<S: State, E: Event> MachineSnapshot<S, E> {
    pub fn capture<C>(table: &TransitionTable<S, E, C>, initial: &S, current: S) -> Self {
        Self {
            initial: initial.clone(),
            current,
            transitions: table
                .iter()
                .map(|t| EdgeSnapshot {
                    from: t.from.clone(),
                    event: t.event.clone(),
                    to: t.to.clone(),
                    has_action: t.callback.is_some(),
                })
                .collect(),
            terminal_states: table.terminal_states().into_iter().cloned().collect(),
        }
    }

    /// Whether the captured current state had no outgoing transition.
    pub fn is_final(&self) -> bool {
        self.transitions.iter().all(|t| t.from != self.current)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }
}
