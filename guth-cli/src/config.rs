//! Command line configuration, loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `GUTH_SECRET_KEY`: hex encoded secret key (required)
//! - `GUTH_TOKEN_LIFETIME_SECS`: lifetime of signed tokens in seconds (default: `600`)
//! - `GUTH_FIELD_SEPARATOR`: if set, signed tokens use delimited framing with this separator

use std::time::Duration;

use guth_core::framing::Framing;
use guth_core::{Config, SecretKey};

const SECRET_KEY: &str = "GUTH_SECRET_KEY";
const TOKEN_LIFETIME_SECS: &str = "GUTH_TOKEN_LIFETIME_SECS";
const FIELD_SEPARATOR: &str = "GUTH_FIELD_SEPARATOR";

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub secret_key: SecretKey,
    pub token_lifetime: Duration,
    pub framing: Framing,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl CliConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through `var`, which looks up one variable by name.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret_key =
            var(SECRET_KEY).ok_or_else(|| ConfigError::MissingEnvVar(SECRET_KEY.to_string()))?;
        let secret_key = SecretKey::from_hex(&secret_key)
            .map_err(|_| invalid(SECRET_KEY, "must be hex encoded"))?;
        if secret_key.is_empty() {
            return Err(invalid(SECRET_KEY, "must not be empty"));
        }

        let token_lifetime = match var(TOKEN_LIFETIME_SECS) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(invalid(
                        TOKEN_LIFETIME_SECS,
                        &format!("'{value}' is not a positive number of seconds"),
                    ));
                }
            },
            None => Config::DEFAULT_TOKEN_LIFETIME,
        };

        let framing = match var(FIELD_SEPARATOR) {
            Some(sep) => Framing::delimited(sep)
                .map_err(|e| invalid(FIELD_SEPARATOR, &e.to_string()))?,
            None => Framing::LengthPrefixed,
        };

        Ok(Self {
            secret_key,
            token_lifetime,
            framing,
        })
    }

    pub fn token_config(&self) -> Config {
        Config::new(self.secret_key.clone())
            .with_token_lifetime(self.token_lifetime)
            .with_framing(self.framing.clone())
    }
}

fn invalid(name: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        message: message.to_string(),
    }
}
