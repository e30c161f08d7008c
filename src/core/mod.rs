//! Core data model shared by both engines.
//!
//! This module contains the parts of the machine that never run callbacks:
//! - State and event labels via the `State` and `Event` traits
//! - The ordered transition table and its matching queries
//! - The logger capability machines report failures through

mod logger;
mod state;
mod table;

pub use logger::{Logger, SharedLogger, TracingLogger};
pub use state::{Event, State};
pub use table::{Transition, TransitionTable};
