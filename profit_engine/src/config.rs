//! Server configuration from environment variables.
//!
//! - `PROFIT_BIND_ADDR`: socket address to listen on (default `127.0.0.1:3000`).
//! - `PROFIT_SCENARIO_DIR`: directory of scenario JSON files (default `scenarios`).
//! - `PROFIT_LOG_JSON`: when set, logs are emitted as JSON.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_SCENARIO_DIR: &str = "scenarios";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub scenario_dir: PathBuf,
    pub json_logs: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("PROFIT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                key: "PROFIT_BIND_ADDR",
                value: raw_addr.clone(),
            })?;
        let scenario_dir = lookup("PROFIT_SCENARIO_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCENARIO_DIR));
        Ok(Self {
            bind_addr,
            scenario_dir,
            json_logs: lookup("PROFIT_LOG_JSON").is_some(),
        })
    }
}
