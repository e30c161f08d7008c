//! Door State Machine
//!
//! Walks an async door machine through opening, a rejected event while a
//! transition is in flight, locking and a failed unlock.
//!
//! Key concepts:
//! - Intermediate states (`opening`, `closing`) made observable
//! - Callbacks chaining the completion event
//! - Arguments passed through `dispatch_with`
//!
//! Run with: RUST_LOG=info cargo run --example door

use anyhow::bail;
use tracing_subscriber::EnvFilter;
use turnstile::core::Logger;
use turnstile::engine::{ActionError, AsyncMachine, AsyncTransition, Outcome};
use turnstile::{event_enum, state_enum, TracingLogger};

state_enum! {
    enum Door {
        Closed = "closed",
        Opening = "opening",
        Opened = "opened",
        Closing = "closing",
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
        Lock = "lock",
        LockComplete = "lockComplete",
        Unlock = "unlock",
        UnlockComplete = "unlockComplete",
        UnlockFailed = "unlockFailed",
    }
}

type Machine = AsyncMachine<Door, DoorEvent, u32>;

fn then(next: DoorEvent) -> impl Fn(Machine, u32) -> Result<Outcome, ActionError> + Send + Sync {
    move |door, _| {
        door.logger().log(&format!("{} ...", door.state()));
        Ok(Outcome::deferred(async move {
            door.dispatch(next).await?;
            Ok(())
        }))
    }
}

fn build(key: u32) -> anyhow::Result<Machine> {
    use Door as s;
    use DoorEvent as e;

    let machine = AsyncMachine::builder()
        .initial(s::Closed)
        .logger(TracingLogger::new("front-door"))
        .transitions([
            AsyncTransition::with_action(s::Closed, e::Open, s::Opening, then(e::OpenComplete)),
            AsyncTransition::new(s::Opening, e::OpenComplete, s::Opened),
            AsyncTransition::with_action(s::Opened, e::Close, s::Closing, then(e::CloseComplete)),
            AsyncTransition::new(s::Closing, e::CloseComplete, s::Closed),
            AsyncTransition::with_action(s::Closed, e::Lock, s::Locking, then(e::LockComplete)),
            AsyncTransition::new(s::Locking, e::LockComplete, s::Locked),
            AsyncTransition::with_action(s::Locked, e::Unlock, s::Unlocking, move |door, attempt| {
                Ok(Outcome::deferred(async move {
                    if attempt == key {
                        door.dispatch(e::UnlockComplete).await?;
                        return Ok(());
                    }
                    door.dispatch(e::UnlockFailed).await?;
                    bail!("key {attempt} does not fit")
                }))
            }),
            AsyncTransition::new(s::Unlocking, e::UnlockComplete, s::Closed),
            AsyncTransition::new(s::Unlocking, e::UnlockFailed, s::Locked),
        ])
        .build()?;
    Ok(machine)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("turnstile=info".parse()?))
        .init();

    println!("=== Door State Machine ===\n");

    let door = build(1234)?;
    println!("Initial state: {}", door.state());

    door.dispatch(DoorEvent::Open).await?;
    println!("After open: {}", door.state());

    let closing = door.dispatch(DoorEvent::Close);
    if let Err(err) = door.dispatch(DoorEvent::Lock).await {
        println!("Lock while closing rejected: {err}");
    }
    closing.await?;
    println!("After close: {}", door.state());

    door.dispatch(DoorEvent::Lock).await?;
    println!("After lock: {}", door.state());

    if let Err(err) = door.dispatch_with(DoorEvent::Unlock, 9999).await {
        println!("Unlock failed: {err} (state: {})", door.state());
    }

    door.dispatch_with(DoorEvent::Unlock, 1234).await?;
    println!("After unlock: {}", door.state());

    println!("\n{}", door.to_diagram(Some("Front door")));
    println!("\n=== Example Complete ===");
    Ok(())
}
