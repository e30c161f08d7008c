//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Event, Logger, SharedLogger, State, Transition, TransitionTable};
use crate::engine::{AsyncAction, AsyncMachine, SyncAction, SyncMachine};

/// Builder for constructing state machines with a fluent API.
///
/// `C` is the callback type and decides which machine `build` produces.
/// Start from [`AsyncMachine::builder`] or [`SyncMachine::builder`] to fix it.
pub struct MachineBuilder<S, E, C> {
    initial: Option<S>,
    transitions: Vec<Transition<S, E, C>>,
    logger: Option<SharedLogger>,
}

impl<S: State, E: Event, C> MachineBuilder<S, E, C> {
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            logger: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn transition(mut self, transition: Transition<S, E, C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once, keeping their order.
    pub fn transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = Transition<S, E, C>>,
    {
        self.transitions.extend(transitions);
        self
    }

    /// Replace the default tracing logger.
    pub fn logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.logger = Some(SharedLogger::new(logger));
        self
    }

    fn into_parts(self) -> Result<(S, TransitionTable<S, E, C>, SharedLogger), BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let table = self.transitions.into_iter().collect();
        Ok((initial, table, self.logger.unwrap_or_default()))
    }
}

impl<S: State, E: Event, A: Send + 'static> MachineBuilder<S, E, AsyncAction<S, E, A>> {
    /// Build an asynchronous machine.
    pub fn build(self) -> Result<AsyncMachine<S, E, A>, BuildError> {
        let (initial, table, logger) = self.into_parts()?;
        Ok(AsyncMachine::from_parts(initial, table, logger))
    }
}

impl<S: State, E: Event, A: 'static> MachineBuilder<S, E, SyncAction<S, E, A>> {
    /// Build a synchronous machine.
    pub fn build(self) -> Result<SyncMachine<S, E, A>, BuildError> {
        let (initial, table, logger) = self.into_parts()?;
        Ok(SyncMachine::from_parts(initial, table, logger))
    }
}

impl<S: State, E: Event, C> Default for MachineBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}
