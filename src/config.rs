//! Configuration management for scatter-brain.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! one is present). The resulting [`Config`] is handed to `main` and passed
//! down explicitly.

use std::env;

use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub static_files: StaticConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct StaticConfig {
    /// Directory served for any request that matches no API route.
    pub dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Unset and empty values
    /// both fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var_or("PORT", "9999");
        let port = port
            .parse()
            .map_err(|_| Error::Config(format!("Invalid PORT: {}", port)))?;

        Ok(Self {
            server: ServerConfig {
                host: var_or("HOST", "0.0.0.0"),
                port,
            },
            database: DatabaseConfig {
                path: var_or("DATABASE_PATH", "./data/scatter-brain.db"),
            },
            static_files: StaticConfig {
                dir: var_or("STATIC_DIR", "public"),
            },
        })
    }
}
