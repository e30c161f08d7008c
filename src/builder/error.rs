//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("machine has no initial state; set one with MachineBuilder::initial")]
    MissingInitialState,
}
