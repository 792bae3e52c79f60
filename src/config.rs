use crate::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_HOST, DEFAULT_LOG_DIR, DEFAULT_LOG_FILTER, DEFAULT_PORT,
};
use crate::error::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Local file path, or a `libsql://` / `http(s)://` URL for a remote database
    pub url: String,
    pub auth_token: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            auth_token: None,
        }
    }
}

impl DatabaseConfig {
    pub fn is_remote(&self) -> bool {
        ["libsql://", "http://", "https://", "ws://", "wss://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
    /// Used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_LOG_DIR.to_string(),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load `path` if it exists, fall back to defaults otherwise, then apply
    /// environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid PORT '{port}': {e}")))?;
        }
        if let Ok(url) = env::var("DATABASE_URL").or_else(|_| env::var("LIBSQL_URL")) {
            self.database.url = url;
        }
        if let Ok(token) = env::var("LIBSQL_AUTH_TOKEN") {
            self.database.auth_token = Some(token);
        }
        if let Ok(dir) = env::var("LOG_DIR") {
            self.logging.dir = dir;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
