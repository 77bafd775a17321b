//! Daemon configuration (environment variables with defaults)

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "~/.petadoption/adoptions.db";
const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9528;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub db_path: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
    /// Daily-rolling log file directory (stdout only when unset)
    pub log_dir: Option<PathBuf>,
}

impl DaemonConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("PETADOPTION_DB_PATH")
            .unwrap_or_else(|| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

        let rpc_host = lookup("PETADOPTION_RPC_HOST").unwrap_or_else(|| DEFAULT_RPC_HOST.to_string());

        let rpc_port = match lookup("PETADOPTION_RPC_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PETADOPTION_RPC_PORT is not a valid port: {}", raw))?,
            None => DEFAULT_RPC_PORT,
        };

        let timeout_ms = match lookup("PETADOPTION_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw.parse::<u64>().with_context(|| {
                format!("PETADOPTION_REQUEST_TIMEOUT_MS is not a number: {}", raw)
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        let log_format = match lookup("PETADOPTION_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let log_dir = lookup("PETADOPTION_LOG_DIR")
            .map(|dir| PathBuf::from(shellexpand::tilde(&dir).into_owned()));

        Ok(Self {
            db_path,
            rpc_host,
            rpc_port,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
            log_dir,
        })
    }

    /// sqlx connection URL for the database file
    pub fn database_url(&self) -> String {
        if self.db_path.starts_with("sqlite:") {
            self.db_path.clone()
        } else {
            format!("sqlite://{}", self.db_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DaemonConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.rpc_host, "127.0.0.1");
        assert_eq!(config.rpc_port, 9528);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.log_dir.is_none());
        assert!(config.db_path.ends_with(".petadoption/adoptions.db"));
    }

    #[test]
    fn test_overrides() {
        let config = DaemonConfig::from_lookup(lookup(&[
            ("PETADOPTION_DB_PATH", "/tmp/a.db"),
            ("PETADOPTION_RPC_PORT", "7000"),
            ("PETADOPTION_REQUEST_TIMEOUT_MS", "250"),
            ("PETADOPTION_LOG_FORMAT", "json"),
            ("PETADOPTION_LOG_DIR", "/var/log/petadoption"),
        ]))
        .unwrap();

        assert_eq!(config.database_url(), "sqlite:///tmp/a.db");
        assert_eq!(config.rpc_port, 7000);
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/petadoption")));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = DaemonConfig::from_lookup(lookup(&[("PETADOPTION_RPC_PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("PETADOPTION_RPC_PORT"));
    }

    #[test]
    fn test_memory_url_passes_through() {
        let config =
            DaemonConfig::from_lookup(lookup(&[("PETADOPTION_DB_PATH", "sqlite::memory:")]))
                .unwrap();
        assert_eq!(config.database_url(), "sqlite::memory:");
    }
}
