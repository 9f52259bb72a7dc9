//! Application settings.
//!
//! Settings come from a TOML file (`config.toml` by default, or the path in
//! `PEERLEND_CONFIG`). `DATABASE_URL` and `JWT_SECRET` in the environment take
//! precedence over the file, so secrets can stay out of it.
//!
//! ```toml
//! [database]
//! url = "sqlite://data/peerlend.sqlite?mode=rwc"
//!
//! [jwt]
//! secret = "at-least-thirty-two-characters-long!!"
//! access_token_minutes = 5
//! refresh_token_days = 1
//!
//! [hashing]
//! memory_kib = 65536
//! iterations = 3
//! parallelism = 1
//! ```

use super::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::{debug, info};

/// Shortest accepted signing secret, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Storage settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token issuance settings
    pub jwt: JwtConfig,
    /// Password hashing cost settings
    #[serde(default)]
    pub hashing: HashingConfig,
}

/// Storage settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL understood by `SeaORM`
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

/// Token issuance settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// HMAC signing secret
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret: SecretString,
    /// Lifetime of access tokens
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
    /// Lifetime of refresh tokens
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: i64,
}

impl JwtConfig {
    /// Builds a configuration with default lifetimes around `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            access_token_minutes: default_access_token_minutes(),
            refresh_token_days: default_refresh_token_days(),
        }
    }
}

const fn default_access_token_minutes() -> i64 {
    5
}

const fn default_refresh_token_days() -> i64 {
    1
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(SecretString::new(raw.into_boxed_str()))
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HashingConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 1,
        }
    }
}

impl AppConfig {
    /// Overrides file values with `DATABASE_URL` and `JWT_SECRET` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            debug!("DATABASE_URL overrides configured database url");
            self.database.url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            debug!("JWT_SECRET overrides configured signing secret");
            self.jwt.secret = SecretString::new(secret.into_boxed_str());
        }
    }

    /// Rejects settings that would make token issuance or hashing unsafe.
    pub fn validate(&self) -> Result<()> {
        if self.jwt.secret.expose_secret().len() < MIN_JWT_SECRET_LEN {
            return Err(Error::Config {
                message: format!("JWT secret must be at least {MIN_JWT_SECRET_LEN} characters long"),
            });
        }
        if self.jwt.access_token_minutes <= 0 || self.jwt.refresh_token_days <= 0 {
            return Err(Error::Config {
                message: "Token lifetimes must be positive".to_string(),
            });
        }
        if self.hashing.iterations == 0 || self.hashing.parallelism == 0 {
            return Err(Error::Config {
                message: "Hashing iterations and parallelism must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses configuration from a TOML string.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads the file named by `PEERLEND_CONFIG` (default `./config.toml`), applies
/// environment overrides and validates the result.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("PEERLEND_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let mut config = load_config(&path)?;
    config.apply_env_overrides();
    config.validate()?;
    info!(%path, "Loaded application configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_parse_full_config() {
        let toml_str = format!(
            r#"
            [database]
            url = "sqlite::memory:"

            [jwt]
            secret = "{SECRET}"
            access_token_minutes = 15
            refresh_token_days = 7

            [hashing]
            memory_kib = 1024
            iterations = 1
            parallelism = 1
        "#
        );

        let config = parse_config(&toml_str).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.jwt.secret.expose_secret(), SECRET);
        assert_eq!(config.jwt.access_token_minutes, 15);
        assert_eq!(config.jwt.refresh_token_days, 7);
        assert_eq!(config.hashing.memory_kib, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let toml_str = format!("[jwt]\nsecret = \"{SECRET}\"\n");

        let config = parse_config(&toml_str).unwrap();
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.jwt.access_token_minutes, 5);
        assert_eq!(config.jwt.refresh_token_days, 1);
        assert_eq!(config.hashing.memory_kib, 65536);
        assert_eq!(config.hashing.iterations, 3);
    }

    #[test]
    fn test_missing_jwt_section_is_an_error() {
        let result = parse_config("[database]\nurl = \"sqlite::memory:\"\n");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_short_secret_fails_validation() {
        let config = parse_config("[jwt]\nsecret = \"short\"\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let result = load_config("/nonexistent/peerlend/config.toml");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
