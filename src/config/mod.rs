// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::Config;

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `STATUSMON_ALERT__API_KEY`
const ENV_PREFIX: &str = "STATUSMON";

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, ENV_PREFIX)
    }

    fn load_with_env(config_path: &str, env_prefix: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.shutdown_grace_secs", 5)?
            .set_default("logging.console", true)?
            .set_default("logging.log_path", "mbservermon.log")?
            .set_default("alert.originator", "MBServerMon")?
            .set_default("alert.recipients", Vec::<String>::new())?
            .set_default("alert.endpoint", crate::transport::DEFAULT_ENDPOINT)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("alert.recipients")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_with_env("does-not-exist", "STATUSMON_TEST_DEFAULTS").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.workers, None);
        assert!(cfg.logging.console);
        assert_eq!(cfg.logging.file_path(), Some("mbservermon.log"));
        assert_eq!(cfg.alert.originator, "MBServerMon");
        assert!(cfg.alert.recipients.is_empty());
        assert_eq!(cfg.alert.endpoint, crate::transport::DEFAULT_ENDPOINT);
        assert_eq!(cfg.alert.active_key(), None);
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
[server]
port = 9090

[logging]
log_path = ""

[alert]
api_key = "live_abc"
recipients = ["31600000001", "31600000002"]
"#,
        );
        let path = file.path().to_str().unwrap();
        let cfg = Config::load_with_env(path, "STATUSMON_TEST_FILE").unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.logging.file_path(), None);
        assert_eq!(cfg.alert.active_key(), Some("live_abc"));
        assert_eq!(cfg.alert.recipients.len(), 2);
    }

    #[test]
    fn test_env_overrides_and_recipient_list() {
        std::env::set_var("STATUSMON_TEST_ENV_SERVER__PORT", "8181");
        std::env::set_var("STATUSMON_TEST_ENV_ALERT__API_KEY", "env_key");
        std::env::set_var("STATUSMON_TEST_ENV_ALERT__RECIPIENTS", "111,222,333");

        let cfg = Config::load_with_env("does-not-exist", "STATUSMON_TEST_ENV").unwrap();

        assert_eq!(cfg.server.port, 8181);
        assert_eq!(cfg.alert.active_key(), Some("env_key"));
        assert_eq!(cfg.alert.recipients, vec!["111", "222", "333"]);
    }

    #[test]
    fn test_alert_needs_recipients() {
        let file = write_config(
            r#"
[alert]
api_key = "live_abc"
"#,
        );
        let path = file.path().to_str().unwrap();
        let cfg = Config::load_with_env(path, "STATUSMON_TEST_NORECIP").unwrap();
        assert_eq!(cfg.alert.active_key(), None);
    }

    #[test]
    fn test_invalid_address() {
        let mut cfg = Config::load_with_env("does-not-exist", "STATUSMON_TEST_ADDR").unwrap();
        cfg.server.host = "not an ip".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
