//! Logger capability handed to every machine.

use std::fmt;
use std::sync::Arc;

/// Console-style logging capability.
///
/// The engine itself only calls [`Logger::error`], for unmatched events and
/// failing callbacks. The other channels exist for callbacks, which reach
/// the logger through the machine they are invoked with.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn log(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn debug(&self, message: &str) {
        (**self).debug(message)
    }

    fn log(&self, message: &str) {
        (**self).log(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Default logger, forwarding every channel to `tracing`.
///
/// `log` maps to the `INFO` level. Each event carries a `machine` field so
/// output from several machines can be told apart.
#[derive(Clone, Debug)]
pub struct TracingLogger {
    machine: String,
}

impl TracingLogger {
    pub fn new(machine: impl Into<String>) -> Self {
        Self {
            machine: machine.into(),
        }
    }

    pub fn machine(&self) -> &str {
        &self.machine
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new("machine")
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(machine = %self.machine, "{message}");
    }

    fn log(&self, message: &str) {
        tracing::info!(machine = %self.machine, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(machine = %self.machine, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(machine = %self.machine, "{message}");
    }
}

/// Shared handle to a logger, as stored by machines.
#[derive(Clone)]
pub struct SharedLogger(Arc<dyn Logger>);

impl SharedLogger {
    pub fn new<L: Logger + 'static>(logger: L) -> Self {
        Self(Arc::new(logger))
    }
}

impl Default for SharedLogger {
    fn default() -> Self {
        Self::new(TracingLogger::default())
    }
}

impl From<Arc<dyn Logger>> for SharedLogger {
    fn from(logger: Arc<dyn Logger>) -> Self {
        Self(logger)
    }
}

impl fmt::Debug for SharedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedLogger")
    }
}

impl Logger for SharedLogger {
    fn debug(&self, message: &str) {
        self.0.debug(message)
    }

    fn log(&self, message: &str) {
        self.0.log(message)
    }

    fn warn(&self, message: &str) {
        self.0.warn(message)
    }

    fn error(&self, message: &str) {
        self.0.error(message)
    }
}
