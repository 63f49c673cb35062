use std::env;
use std::fmt;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set (or is empty).
    Missing(&'static str),
    /// A variable is set but cannot be parsed.
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process-wide settings, read once at startup and handed to the components
/// that need them.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. When unset the server keeps its data in memory.
    pub database_url: Option<String>,
    /// Secret used to sign and verify authentication tokens.
    pub jwt_secret: String,
    pub server_port: u16,
    pub server_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let server_port = match env::var("SERVER_PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "SERVER_PORT",
                value,
            })?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret,
            server_port,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
