use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{ApiError, Result};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

// Development fallback only; deployments override it in the config file.
const DEFAULT_TOKEN_SECRET: &str = "bookshelf-dev-secret-0123456789abcdef";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Both the token issue and verify paths read this one field, so the
    /// two sides can never disagree on the secret.
    pub token_secret: String,
    pub token_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            token_secret: DEFAULT_TOKEN_SECRET.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl ServerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}
