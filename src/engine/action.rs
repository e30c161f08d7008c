//! Transition callbacks for both engines.

use super::async_machine::AsyncMachine;
use super::error::ActionError;
use super::sync_machine::SyncMachine;
use crate::core::{Event, State, Transition};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// What an async callback hands back once it has returned.
pub enum Outcome {
    /// The callback's work is done.
    Immediate,

    /// The callback started work that settles later. The dispatch resolves
    /// with this future's result.
    Deferred(BoxFuture<'static, Result<(), ActionError>>),
}

impl Outcome {
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        Self::Deferred(future.boxed())
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => f.write_str("Immediate"),
            Self::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// Callback of an async transition.
///
/// Invoked with a handle to the owning machine (already in the target
/// state) and the dispatch arguments. Returning `Err` is a synchronous
/// failure; an `Outcome::Deferred` future failing is an eventual one.
pub type AsyncAction<S, E, A = ()> =
    Arc<dyn Fn(AsyncMachine<S, E, A>, A) -> Result<Outcome, ActionError> + Send + Sync>;

/// Callback of a sync transition, invoked with the machine already in the
/// target state.
pub type SyncAction<S, E, A = ()> =
    Arc<dyn Fn(&SyncMachine<S, E, A>, A) -> Result<(), ActionError> + Send + Sync>;

pub type AsyncTransition<S, E, A = ()> = Transition<S, E, AsyncAction<S, E, A>>;

pub type SyncTransition<S, E, A = ()> = Transition<S, E, SyncAction<S, E, A>>;

impl<S: State, E: Event, A: Send + 'static> Transition<S, E, AsyncAction<S, E, A>> {
    /// Create an async transition that runs `action` after the state moves.
    ///
    /// # Example
    ///
    /// ```
    /// use turnstile::engine::{AsyncTransition, Outcome};
    ///
    /// let transition: AsyncTransition<String, String> = AsyncTransition::with_action(
    ///     "closed".to_string(),
    ///     "open".to_string(),
    ///     "opening".to_string(),
    ///     |machine, ()| {
    ///         Ok(Outcome::deferred(async move {
    ///             machine.dispatch("openComplete".to_string()).await?;
    ///             Ok(())
    ///         }))
    ///     },
    /// );
    /// assert!(transition.callback.is_some());
    /// ```
    pub fn with_action<F>(from: S, event: E, to: S, action: F) -> Self
    where
        F: Fn(AsyncMachine<S, E, A>, A) -> Result<Outcome, ActionError> + Send + Sync + 'static,
    {
        Self::new(from, event, to).with_callback(Arc::new(action))
    }
}

impl<S: State, E: Event, A: 'static> Transition<S, E, SyncAction<S, E, A>> {
    /// Create a sync transition that runs `action` after the state moves.
    pub fn with_handler<F>(from: S, event: E, to: S, handler: F) -> Self
    where
        F: Fn(&SyncMachine<S, E, A>, A) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self::new(from, event, to).with_callback(Arc::new(handler))
    }
}
