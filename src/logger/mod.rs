//! Logger module
//!
//! Fans log events out to registered destinations:
//! - Each destination declares the levels it accepts
//! - Events are rendered once and written in registration order
//! - A failing destination never stops delivery to the others

pub mod alert;
pub mod error;
mod format;
mod level;
pub mod writer;

use std::sync::atomic::{AtomicU64, Ordering};

pub use alert::AlertDestination;
pub use error::DestinationError;
pub use format::LogEvent;
pub use level::{Level, LevelSet};
pub use writer::{ConsoleDestination, Destination, FileDestination};

struct Registration {
    destination: Box<dyn Destination>,
    levels: LevelSet,
}

/// Builder collecting destinations before the dispatcher goes live
#[derive(Default)]
pub struct DispatcherBuilder {
    registrations: Vec<Registration>,
}

impl DispatcherBuilder {
    /// Register a destination for the given levels
    #[must_use]
    pub fn register(mut self, destination: impl Destination + 'static, levels: LevelSet) -> Self {
        self.registrations.push(Registration {
            destination: Box::new(destination),
            levels,
        });
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            registrations: self.registrations,
            failures: AtomicU64::new(0),
        }
    }
}

/// Process-wide log fan-out, built once at startup and shared by reference
pub struct Dispatcher {
    registrations: Vec<Registration>,
    failures: AtomicU64,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Names of the registered destinations, in registration order
    pub fn destinations(&self) -> Vec<&str> {
        self.registrations
            .iter()
            .map(|r| r.destination.name())
            .collect()
    }

    /// Total failed writes and flushes since startup
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Render `message` and write it to every destination accepting `level`.
    ///
    /// Returns how many destinations took the event without error.
    pub async fn emit(&self, level: Level, message: impl Into<String>) -> usize {
        let text = LogEvent::new(level, message).render();
        let mut delivered = 0;

        for reg in self.registrations.iter().filter(|r| r.levels.contains(level)) {
            match reg.destination.write(&text).await {
                Ok(()) => delivered += 1,
                Err(e) => self.report_failure(reg.destination.name(), "write", &e),
            }
        }

        delivered
    }

    pub async fn info(&self, message: impl Into<String>) -> usize {
        self.emit(Level::Info, message).await
    }

    pub async fn warning(&self, message: impl Into<String>) -> usize {
        self.emit(Level::Warning, message).await
    }

    pub async fn error(&self, message: impl Into<String>) -> usize {
        self.emit(Level::Error, message).await
    }

    pub async fn fatal(&self, message: impl Into<String>) -> usize {
        self.emit(Level::Fatal, message).await
    }

    /// Flush every destination, called once at shutdown
    pub async fn flush(&self) {
        for reg in &self.registrations {
            if let Err(e) = reg.destination.flush().await {
                self.report_failure(reg.destination.name(), "flush", &e);
            }
        }
    }

    fn report_failure(&self, name: &str, operation: &str, err: &DestinationError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        eprintln!("[WARN] Log destination '{name}' failed to {operation}: {err}");
    }
}
