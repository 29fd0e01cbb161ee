//! Log destinations
//!
//! A destination accepts rendered log text and reports success or failure.
//! Console and file sinks live here; the SMS alert sink lives in `alert`.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::{DestinationError, Result};

/// A sink for rendered log lines
#[async_trait]
pub trait Destination: Send + Sync {
    /// Short name used when reporting failures
    fn name(&self) -> &str;

    /// Write one rendered event
    async fn write(&self, text: &str) -> Result<()>;

    /// Flush buffered output, called once at shutdown
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Writes text verbatim to stdout
#[derive(Debug, Default)]
pub struct ConsoleDestination;

impl ConsoleDestination {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Destination for ConsoleDestination {
    fn name(&self) -> &str {
        "console"
    }

    async fn write(&self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())
            .map_err(|e| DestinationError::io("writing to stdout", e))
    }

    async fn flush(&self) -> Result<()> {
        io::stdout()
            .flush()
            .map_err(|e| DestinationError::io("flushing stdout", e))
    }
}

/// Appends text verbatim to a log file
#[derive(Debug)]
pub struct FileDestination {
    file: Mutex<File>,
}

impl FileDestination {
    /// Open (or create) the log file for appending
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = open_log_file(path.as_ref())?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl Destination for FileDestination {
    fn name(&self) -> &str {
        "file"
    }

    async fn write(&self, text: &str) -> Result<()> {
        let mut file = self.file.lock().map_err(|_| DestinationError::Poisoned)?;
        file.write_all(text.as_bytes())
            .map_err(|e| DestinationError::io("appending to log file", e))
    }

    async fn flush(&self) -> Result<()> {
        let mut file = self.file.lock().map_err(|_| DestinationError::Poisoned)?;
        file.flush()
            .and_then(|()| file.sync_all())
            .map_err(|e| DestinationError::io("syncing log file", e))
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &Path) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}
