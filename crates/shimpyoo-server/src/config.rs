use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use shimpyoo_completion::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} is still a placeholder value")]
    Placeholder(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub gpt_api_key: String,
    pub gpt_model: String,
    pub gpt_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port_raw = var("SHIMPYOO_PORT", "8080");
        let port = port_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "SHIMPYOO_PORT",
            value: port_raw.clone(),
        })?;

        let jwt_secret = lookup("SHIMPYOO_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("SHIMPYOO_JWT_SECRET"))?;
        if PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            return Err(ConfigError::Placeholder("SHIMPYOO_JWT_SECRET"));
        }

        let gpt_api_key = lookup("GPT_API_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("GPT_API_KEY"))?;

        Ok(Self {
            host: var("SHIMPYOO_HOST", "0.0.0.0"),
            port,
            db_path: var("SHIMPYOO_DB_PATH", "shimpyoo.db").into(),
            jwt_secret,
            gpt_api_key,
            gpt_model: var("GPT_MODEL", DEFAULT_MODEL),
            gpt_base_url: var("GPT_API_BASE_URL", DEFAULT_BASE_URL),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            name: "SHIMPYOO_HOST",
            value: self.host.clone(),
        })
    }
}
