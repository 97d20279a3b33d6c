use nf_core::types::FeedLimits;
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use thiserror::Error;

pub const ENV_CONFIG: &str = "NOTIFEED_CONFIG";
pub const ENV_DB_PATH: &str = "NOTIFEED_DB_PATH";
pub const ENV_PORT: &str = "NOTIFEED_PORT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    Read { path: String, message: String },
    #[error("cannot parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub feed: FeedLimits,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 4830,
            db_path: ".notifeed/notifications.db".to_string(),
        }
    }
}

impl Config {
    /// Reads the TOML file at `path` when given, then applies environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: display.clone(),
            message: err.to_string(),
        })?;
        toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path: display,
            message: err.to_string(),
        })
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db_path) = lookup(ENV_DB_PATH).filter(|value| !value.trim().is_empty()) {
            self.server.db_path = db_path;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_PORT,
                message: format!("{port:?} is not a port number"),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.default_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "feed.default_page_size",
                message: "must be at least 1".to_string(),
            });
        }
        if self.feed.max_page_size < self.feed.default_page_size {
            return Err(ConfigError::Invalid {
                key: "feed.max_page_size",
                message: "must not be below feed.default_page_size".to_string(),
            });
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }
}
