//! Machine whose dispatch runs in-line.

use super::action::SyncAction;
use super::error::DispatchError;
use crate::builder::MachineBuilder;
use crate::core::{Event, Logger, SharedLogger, State, Transition, TransitionTable};
use crate::render::{self, MachineSnapshot};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// State machine with synchronous dispatch.
///
/// Unlike [`AsyncMachine`](super::AsyncMachine), a failing callback rolls the
/// machine back to the state it was in before the event.
pub struct SyncMachine<S, E, A = ()> {
    initial: S,
    current: S,
    table: TransitionTable<S, E, SyncAction<S, E, A>>,
    logger: SharedLogger,
}

impl<S: State, E: Event, A: 'static> SyncMachine<S, E, A> {
    /// Create a machine with an empty table and the default logger.
    pub fn new(initial: S) -> Self {
        Self::from_parts(initial, TransitionTable::new(), SharedLogger::default())
    }

    pub fn builder() -> MachineBuilder<S, E, SyncAction<S, E, A>> {
        MachineBuilder::new()
    }

    pub(crate) fn from_parts(
        initial: S,
        table: TransitionTable<S, E, SyncAction<S, E, A>>,
        logger: SharedLogger,
    ) -> Self {
        Self {
            current: initial.clone(),
            initial,
            table,
            logger,
        }
    }

    pub fn state(&self) -> &S {
        &self.current
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn can(&self, event: &E) -> bool {
        self.table.can_fire(&self.current, event)
    }

    pub fn next_state(&self, event: &E) -> Option<&S> {
        self.table.next_state(&self.current, event)
    }

    pub fn is_final(&self) -> bool {
        self.table.is_terminal(&self.current)
    }

    pub fn add_transitions<I>(&mut self, transitions: I)
    where
        I: IntoIterator<Item = Transition<S, E, SyncAction<S, E, A>>>,
    {
        self.table.append(transitions);
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Always fails: a synchronous machine only supports
    /// [`sync_dispatch`](Self::sync_dispatch).
    pub fn dispatch(&self, event: E) -> Result<(), DispatchError> {
        let err = DispatchError::Unsupported;
        self.logger
            .error(&format!("{err} (event {})", event.name()));
        Err(err)
    }

    /// Dispatch `event` with default arguments.
    pub fn sync_dispatch(&mut self, event: E) -> Result<bool, DispatchError>
    where
        A: Default,
    {
        self.sync_dispatch_with(event, A::default())
    }

    /// Fire `event` now.
    ///
    /// Returns `Ok(false)` when no transition matches, leaving the state
    /// alone. When the callback fails the state is restored to its value
    /// before the call and the callback's error is returned. A panicking
    /// callback also restores the state before the panic continues.
    pub fn sync_dispatch_with(&mut self, event: E, args: A) -> Result<bool, DispatchError> {
        let Some(transition) = self.table.find(&self.current, &event) else {
            let err = DispatchError::no_transition(&self.current, &event);
            self.logger.error(&err.to_string());
            return Ok(false);
        };

        let callback = transition.callback.clone();
        let previous = std::mem::replace(&mut self.current, transition.to.clone());

        let Some(callback) = callback else {
            return Ok(true);
        };

        let called = panic::catch_unwind(AssertUnwindSafe(|| callback(&*self, args)));
        let called = match called {
            Ok(called) => called,
            Err(payload) => {
                self.current = previous;
                panic::resume_unwind(payload);
            }
        };

        match called {
            Ok(()) => Ok(true),
            Err(err) => {
                self.current = previous;
                self.logger
                    .error(&format!("Exception caught in callback: {err:#}"));
                Err(DispatchError::Action(err))
            }
        }
    }

    /// Render the table as a Mermaid state diagram.
    pub fn to_diagram(&self, title: Option<&str>) -> String {
        render::mermaid(&self.table, &self.initial, title)
    }

    pub fn snapshot(&self) -> MachineSnapshot<S, E> {
        MachineSnapshot::capture(&self.table, &self.initial, self.current.clone())
    }
}

impl<S: State, E: Event, A> fmt::Debug for SyncMachine<S, E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncMachine")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("transitions", &self.table.len())
            .finish()
    }
}
