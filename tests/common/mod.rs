//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use turnstile::core::Logger;
use turnstile::{event_enum, state_enum};

state_enum! {
    pub enum DoorState {
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
    pub enum DoorEvent {
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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Debug,
    Log,
    Warn,
    Error,
}

/// Logger that keeps every line for later assertions.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, line)| line)
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.push(Level::Debug, message);
    }

    fn log(&self, message: &str) {
        self.push(Level::Log, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
