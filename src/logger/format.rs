//! Log event rendering
//!
//! Every event renders to a single newline-terminated line:
//!
//! ```text
//! time="2026-10-19T12:00:00+02:00" level=error msg="Server error. [GET /simulate/503] 503 Service Unavailable"
//! ```

use chrono::{DateTime, Local, SecondsFormat};

use super::level::Level;

/// A single log event, immutable once created
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// Severity
    pub level: Level,
    /// Formatted message text
    pub message: String,
    /// Creation timestamp
    pub time: DateTime<Local>,
}

impl LogEvent {
    /// Create a new event stamped with the current local time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self::at(level, message, Local::now())
    }

    pub fn at(level: Level, message: impl Into<String>, time: DateTime<Local>) -> Self {
        Self {
            level,
            message: message.into(),
            time,
        }
    }

    /// Render the event into destination-ready text
    pub fn render(&self) -> String {
        format!(
            "time=\"{}\" level={} msg={}\n",
            self.time.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.level,
            quote_value(&self.message),
        )
    }
}

/// Values made only of these characters are written bare
const fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/' | '@' | '^' | '+')
}

/// Quote a field value if it contains anything beyond the bare charset
fn quote_value(value: &str) -> String {
    if value.chars().all(is_bare_char) {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
