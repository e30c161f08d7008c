//! Read-only views of a machine for collaborators outside the engine:
//! Mermaid diagrams and serializable snapshots.

mod mermaid;
mod snapshot;

pub use mermaid::mermaid;
pub use snapshot::{EdgeSnapshot, MachineSnapshot, SnapshotError};
