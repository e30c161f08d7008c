//! Turnstile: a finite state machine engine with async and sync dispatch
//!
//! A machine holds a current state and an ordered table of transitions.
//! Dispatching an event looks up the first transition leaving the current
//! state on that event, moves to its target and runs its callback.
//!
//! # Core Concepts
//!
//! - **State / Event**: opaque labels, via the `State` and `Event` traits
//! - **Transition table**: ordered rules, first match wins
//! - **AsyncMachine**: dispatch settles on a later tokio turn, no rollback
//! - **SyncMachine**: dispatch runs in-line, rolls back on callback failure
//! - **Diagrams**: Mermaid rendering of any machine's table
//!
//! # Example
//!
//! ```rust
//! use turnstile::engine::{AsyncMachine, AsyncTransition, Outcome};
//! use turnstile::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Door {
//!         Closed = "closed",
//!         Opening = "opening",
//!         Opened = "opened",
//!     }
//! }
//!
//! event_enum! {
//!     enum DoorEvent {
//!         Open = "open",
//!         OpenComplete = "openComplete",
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let door = AsyncMachine::builder()
//!     .initial(Door::Closed)
//!     .transitions([
//!         AsyncTransition::with_action(Door::Closed, DoorEvent::Open, Door::Opening, |door, ()| {
//!             Ok(Outcome::deferred(async move {
//!                 door.dispatch(DoorEvent::OpenComplete).await?;
//!                 Ok(())
//!             }))
//!         }),
//!         AsyncTransition::new(Door::Opening, DoorEvent::OpenComplete, Door::Opened),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! door.dispatch(DoorEvent::Open).await.unwrap();
//! assert_eq!(door.state(), Door::Opened);
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod render;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder};
pub use crate::core::{Event, Logger, State, TracingLogger, Transition, TransitionTable};
pub use crate::engine::{AsyncMachine, Dispatch, DispatchError, Outcome, SyncMachine};
pub use crate::render::MachineSnapshot;
