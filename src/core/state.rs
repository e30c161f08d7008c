//! Label traits for machine states and events.
//!
//! States and events are opaque labels. The engine only ever compares them
//! for equality and asks for their name when logging or rendering.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: the machine hands out copies of its current state
/// - `PartialEq`: transitions are matched by equality
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states appear in machine snapshots
///
/// # Example
///
/// ```rust
/// use turnstile::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Valve {
///     Shut,
///     Flowing,
/// }
///
/// impl State for Valve {
///     fn name(&self) -> &str {
///         match self {
///             Self::Shut => "shut",
///             Self::Flowing => "flowing",
///         }
///     }
/// }
///
/// assert_eq!(Valve::Flowing.name(), "flowing");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Name used in diagrams and error messages.
    fn name(&self) -> &str;
}

/// Trait for events that drive a state machine.
///
/// Same shape as [`State`]; the two are kept apart so a machine cannot be
/// fed a state where an event is expected.
pub trait Event:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Name used in diagrams and error messages.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self
    }
}

impl Event for String {
    fn name(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Running,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "idle",
                Self::Running => "running",
            }
        }
    }

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Start,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            "start"
        }
    }

    #[test]
    fn state_name_returns_label() {
        assert_eq!(TestState::Idle.name(), "idle");
        assert_eq!(TestState::Running.name(), "running");
    }

    #[test]
    fn event_name_returns_label() {
        assert_eq!(TestEvent::Start.name(), "start");
    }

    #[test]
    fn strings_are_their_own_name() {
        let state = String::from("closed");
        assert_eq!(State::name(&state), "closed");
        assert_eq!(Event::name(&String::from("open")), "open");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Running;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
