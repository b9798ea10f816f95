// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Resolved once at startup and handed to the storage, AI and HTTP layers

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use proposer_ai::AIConfig;
use proposer_core::constants::{
    ANTHROPIC_API_KEY, ANTHROPIC_API_URL, ANTHROPIC_MODEL, PORT, PROPOSER_AI_TIMEOUT_SECS,
    PROPOSER_API_PORT, PROPOSER_CORS_ORIGIN, PROPOSER_DATABASE_PATH, PROPOSER_HOST,
};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 4001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid AI timeout (expected a positive number of seconds): {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    pub cors_origin: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: Option<String>,
    pub anthropic_api_url: Option<String>,
    /// Unset means requests to the model never time out
    pub ai_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = match non_empty_var(PROPOSER_HOST) {
            Some(raw) => raw
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(raw))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        // PORT is the legacy name
        let port = match non_empty_var(PROPOSER_API_PORT).or_else(|| non_empty_var(PORT)) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let database_path = match non_empty_var(PROPOSER_DATABASE_PATH) {
            Some(path) => PathBuf::from(path),
            None => proposer_core::database_file(),
        };

        let cors_origin =
            non_empty_var(PROPOSER_CORS_ORIGIN).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let ai_timeout = match non_empty_var(PROPOSER_AI_TIMEOUT_SECS) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Config {
            host,
            port,
            database_path,
            cors_origin,
            anthropic_api_key: non_empty_var(ANTHROPIC_API_KEY),
            anthropic_model: non_empty_var(ANTHROPIC_MODEL),
            anthropic_api_url: non_empty_var(ANTHROPIC_API_URL),
            ai_timeout,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Client settings for the hosted model
    pub fn ai_config(&self) -> AIConfig {
        let mut config = AIConfig::default();
        if let Some(key) = &self.anthropic_api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(model) = &self.anthropic_model {
            config = config.with_model(model.clone());
        }
        if let Some(url) = &self.anthropic_api_url {
            config = config.with_api_url(url.clone());
        }
        if let Some(timeout) = self.ai_timeout {
            config = config.with_request_timeout(timeout);
        }
        config
    }
}

pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let port = raw.trim().parse::<u16>()?;
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
