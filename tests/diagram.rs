//! Mermaid rendering of the door machines.

mod common;

use common::{DoorEvent, DoorState};
use turnstile::engine::{AsyncMachine, AsyncTransition, SyncMachine, SyncTransition};

fn stringy_door() -> AsyncMachine<DoorState, DoorEvent> {
    use DoorEvent as e;
    use DoorState as s;

    let door = AsyncMachine::new(s::Closed);
    door.add_transitions([
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
    ]);
    door
}

#[test]
fn generates_state_diagram() {
    let mmd = stringy_door().to_diagram(None);
    let lines: Vec<&str> = mmd.split('\n').collect();

    assert_eq!(
        lines,
        vec![
            "stateDiagram-v2",
            "  [*] --> closed",
            "  closed --> opening: open",
            "  opening --> opened: openComplete",
            "  opened --> closing: close",
            "  closing --> closed: closeComplete",
            "  opened --> breaking: break",
            "  closed --> breaking: break",
            "  closed --> locking: lock",
            "  locking --> locked: lockComplete",
            "  locked --> unlocking: unlock",
            "  unlocking --> closed: unlockComplete",
            "  unlocking --> locked: unlockFailed",
            "  breaking --> broken: breakComplete",
            "  broken --> [*]",
        ]
    );
}

#[test]
fn generates_state_diagram_with_title() {
    let mmd = stringy_door().to_diagram(Some("The Door Machine"));
    let lines: Vec<&str> = mmd.split('\n').collect();

    assert_eq!(lines[0], "---");
    assert_eq!(lines[1], "title: The Door Machine");
    assert_eq!(lines[2], "---");
    assert_eq!(lines[3], "stateDiagram-v2");
    assert_eq!(lines.len(), 18);
}

#[test]
fn cyclic_door_has_no_terminal_state() {
    use DoorEvent as e;
    use DoorState as s;

    let mut door: SyncMachine<DoorState, DoorEvent> = SyncMachine::new(s::Closed);
    door.add_transitions([
        SyncTransition::new(s::Closed, e::Open, s::Opening),
        SyncTransition::new(s::Opening, e::OpenComplete, s::Opened),
        SyncTransition::new(s::Opened, e::Close, s::Closing),
        SyncTransition::new(s::Closing, e::CloseComplete, s::Closed),
    ]);

    assert_eq!(
        door.to_diagram(None),
        [
            "stateDiagram-v2",
            "  [*] --> closed",
            "  closed --> opening: open",
            "  opening --> opened: openComplete",
            "  opened --> closing: close",
            "  closing --> closed: closeComplete",
        ]
        .join("\n")
    );
}

#[test]
fn rendering_is_deterministic_and_pure() {
    let door = stringy_door();
    let first = door.to_diagram(Some("Door"));
    let second = door.to_diagram(Some("Door"));

    assert_eq!(first, second);
    assert_eq!(door.state(), DoorState::Closed);
}

#[test]
fn initial_state_is_the_configured_one() {
    let door: AsyncMachine<DoorState, DoorEvent> = AsyncMachine::new(DoorState::Locked);
    assert_eq!(door.to_diagram(None), "stateDiagram-v2\n  [*] --> locked");
}
