//! Configuration management for the stash server
//!
//! Values are resolved from an optional `config.toml`, `STASH_*` environment
//! overrides, and built-in defaults. The storage root additionally honors the
//! `STORAGE_PATH` environment variable, which sits between the built-in
//! default and the config file.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Server configuration, immutable after startup
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Root directory all served paths are confined to
    pub storage_root: String,

    /// Directory holding the append-only audit log
    pub log_dir: String,
}

impl ServerConfig {
    /// Load configuration with precedence:
    /// defaults < `STORAGE_PATH` < `config.toml` < `STASH_*` environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("bind_address", "0.0.0.0")?
            .set_default("port", 5020)?
            .set_default("storage_root", "FileStorage")?
            .set_default("log_dir", "Logs")?;

        if let Ok(path) = std::env::var("STORAGE_PATH") {
            builder = builder.set_default("storage_root", path)?;
        }

        let settings = builder
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("STASH"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.storage_root.is_empty() {
            return Err(ConfigError::Message("storage_root cannot be empty".into()));
        }

        if self.log_dir.is_empty() {
            return Err(ConfigError::Message("log_dir cannot be empty".into()));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the storage root as a PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }

    /// Get the full path of the audit log file
    pub fn log_file_path(&self) -> PathBuf {
        Path::new(&self.log_dir).join("log.txt")
    }
}
