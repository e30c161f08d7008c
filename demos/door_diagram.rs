//! Door Diagram
//!
//! Renders the door machine as a Mermaid state diagram and writes it to
//! `door.mmd` in the current directory, along with a JSON snapshot.
//!
//! Run with: cargo run --example door_diagram

use std::fs;
use std::path::PathBuf;
use turnstile::engine::{AsyncMachine, AsyncTransition};
use turnstile::{event_enum, state_enum};

state_enum! {
    enum Door {
        Closing = "closing",
        Closed = "closed",
        Opening = "opening",
        Opened = "opened",
        Breaking = "breaking",
        Broken = "broken",
        Locking = "locking",
        Locked = "locked",
        Unlocking = "unlocking",
    }
}

event_enum! {
    enum DoorEvent {
        Open = "open",
        OpenComplete = "openComplete",
        Close = "close",
        CloseComplete = "closeComplete",
        Break = "break",
        BreakComplete = "breakComplete",
        Lock = "lock",
        LockComplete = "lockComplete",
        Unlock = "unlock",
        UnlockComplete = "unlockComplete",
        UnlockFailed = "unlockFailed",
    }
}

fn main() -> anyhow::Result<()> {
    use Door as s;
    use DoorEvent as e;

    let door: AsyncMachine<Door, DoorEvent> = AsyncMachine::builder()
        .initial(s::Closed)
        .transitions([
            AsyncTransition::new(s::Closed, e::Open, s::Opening),
            AsyncTransition::new(s::Opening, e::OpenComplete, s::Opened),
            AsyncTransition::new(s::Opened, e::Close, s::Closing),
            AsyncTransition::new(s::Closing, e::CloseComplete, s::Closed),
            AsyncTransition::new(s::Opened, e::Break, s::Breaking),
            AsyncTransition::new(s::Closed, e::Break, s::Breaking),
            AsyncTransition::new(s::Closed, e::Lock, s::Locking),
            AsyncTransition::new(s::Locking, e::LockComplete, s::Locked),
            AsyncTransition::new(s::Locked, e::Unlock, s::Unlocking),
            AsyncTransition::new(s::Unlocking, e::UnlockComplete, s::Closed),
            AsyncTransition::new(s::Unlocking, e::UnlockFailed, s::Locked),
            AsyncTransition::new(s::Breaking, e::BreakComplete, s::Broken),
        ])
        .build()?;

    let cwd = std::env::current_dir()?;
    let diagram_path: PathBuf = cwd.join("door.mmd");
    fs::write(&diagram_path, door.to_diagram(None))?;
    println!("Wrote {}", diagram_path.display());

    let snapshot_path = cwd.join("door.json");
    fs::write(&snapshot_path, door.snapshot().to_json_pretty()?)?;
    println!("Wrote {}", snapshot_path.display());

    Ok(())
}
