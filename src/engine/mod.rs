//! Dispatch engines.
//!
//! Both engines match events against the same [`TransitionTable`] and differ
//! in how a transition and its callback are carried out:
//!
//! - **[`AsyncMachine`]**: events are queued and matched on a later tokio
//!   turn in issue order, the state is committed before the callback and
//!   never rolled back.
//! - **[`SyncMachine`]**: matching runs in-line, a failing callback restores
//!   the previous state.
//!
//! [`TransitionTable`]: crate::core::TransitionTable

mod action;
mod async_machine;
mod error;
mod sync_machine;

pub use action::{AsyncAction, AsyncTransition, Outcome, SyncAction, SyncTransition};
pub use async_machine::{AsyncMachine, Dispatch};
pub use error::{ActionError, DispatchError};
pub use sync_machine::SyncMachine;
