//! Startup configuration.
//!
//! Read once from environment variables at process start; every value has a
//! default so the binary runs with no environment at all.

use std::path::PathBuf;

/// Process-wide settings, assembled from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP listener to.
    pub host: String,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables:
    /// - `TASKBOARD_HOST` - bind address (default `0.0.0.0`)
    /// - `TASKBOARD_PORT` - bind port (default `8080`)
    /// - `TASKBOARD_DB` - SQLite database file (default `taskboard.db`)
    pub fn from_env() -> Self {
        let host = std::env::var("TASKBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("TASKBOARD_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let database_path = std::env::var("TASKBOARD_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("taskboard.db"));

        Self {
            host,
            port,
            database_path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: PathBuf::from("taskboard.db"),
        }
    }
}
