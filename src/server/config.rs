//! Server configuration
//!
//! Tunables for the server. The control port always comes from the command
//! line (there is no configuration file); everything here has a hard default
//! and can be overridden through `MFTP_`-prefixed environment variables,
//! e.g. `MFTP_BUFFER_SIZE=4096`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::protocol::MAX_LINE_LEN;

/// Server configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the control listener and data listeners bind to.
    pub bind_address: String,

    /// Directory new sessions start in.
    pub server_root: String,

    /// Chunk size for data-channel streaming.
    pub buffer_size: usize,

    /// Hard cap on a control-channel line; longer lines are truncated.
    pub max_line_length: usize,

    /// Idle-session hardening: seconds without a command before the session
    /// is dropped. Zero disables the timeout.
    pub idle_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            server_root: ".".to_string(),
            buffer_size: 8192,
            max_line_length: MAX_LINE_LEN,
            idle_timeout_secs: 0,
        }
    }
}

impl ServerConfig {
    /// Builds the configuration from defaults plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("server_root", defaults.server_root)?
            .set_default("buffer_size", defaults.buffer_size as i64)?
            .set_default("max_line_length", defaults.max_line_length as i64)?
            .set_default("idle_timeout_secs", defaults.idle_timeout_secs as i64)?
            .add_source(Environment::with_prefix("MFTP"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }
        if self.max_line_length == 0 {
            return Err(ConfigError::Message(
                "max_line_length must be greater than 0".into(),
            ));
        }
        if self.server_root.is_empty() {
            return Err(ConfigError::Message("server_root cannot be empty".into()));
        }
        Ok(())
    }

    /// Control socket address for a given port.
    pub fn control_socket(&self, port: u16) -> String {
        format!("{}:{}", self.bind_address, port)
    }

    /// Session root as a path.
    pub fn server_root_path(&self) -> PathBuf {
        PathBuf::from(&self.server_root)
    }

    /// Idle timeout, if enabled.
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_line_length, MAX_LINE_LEN);
        assert!(config.idle_timeout().is_none());
    }

    #[test]
    fn test_validate_rejects_zero_buffer() {
        let config = ServerConfig {
            buffer_size: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_control_socket_formatting() {
        let config = ServerConfig::default();
        assert_eq!(config.control_socket(2121), "0.0.0.0:2121");
    }
}
