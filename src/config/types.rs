// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub alert: AlertConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Seconds to wait for in-flight connections on shutdown
    pub shutdown_grace_secs: u64,
}

/// Local log sinks
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Register the stdout destination
    pub console: bool,
    /// Append-only log file; empty disables file logging
    pub log_path: String,
}

/// SMS alerting for severe events
#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    /// Transport credential; alerting is off while unset
    #[serde(default)]
    pub api_key: Option<String>,
    pub originator: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub endpoint: String,
}

impl AlertConfig {
    /// Credential to use, if alerting can actually reach someone
    pub fn active_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty() && !self.recipients.is_empty())
    }
}

impl LoggingConfig {
    pub fn file_path(&self) -> Option<&str> {
        let path = self.log_path.trim();
        (!path.is_empty()).then_some(path)
    }
}
