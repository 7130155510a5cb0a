//! Application configuration module
//!
//! Settings are read once at startup from the process environment (after
//! `.env` has been loaded by the binary) and are immutable afterwards.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `APP_NAME` | `CRM + HRMS API` |
//! | `ENVIRONMENT` | `development` |
//! | `DEBUG` | `true` |
//! | `SECRET_KEY` | development key (rejected when `DEBUG=false`) |
//! | `ALGORITHM` | `HS256` |
//! | `ACCESS_TOKEN_EXPIRE_MINUTES` | `30` |
//! | `DATABASE_URL` | `sqlite:crm_hrms_db.sqlite` |
//! | `DATABASE_NAME` | `crm_hrms_db` |
//! | `DATABASE_TIMEOUT_SECS` | `5` |
//! | `BCRYPT_COST` | `bcrypt::DEFAULT_COST` |
//! | `HOST` / `PORT` | `0.0.0.0` / `8000` |

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Secret used when `SECRET_KEY` is not provided. Only acceptable in debug mode.
pub const DEFAULT_SECRET_KEY: &str = "development-key-only-change-in-production";

const HMAC_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub environment: String,
    pub debug: bool,
    /// Signing secret for access tokens
    pub secret_key: String,
    /// JWT algorithm identifier (HMAC family only)
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
    /// `sqlite:<path>`, `sqlite::memory:` or `memory`
    pub database_url: String,
    pub database_name: String,
    /// Bound on acquiring a connection and on every store operation
    pub database_timeout: Duration,
    pub bcrypt_cost: u32,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "CRM + HRMS API".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
            debug: true,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            database_url: "sqlite:crm_hrms_db.sqlite".to_string(),
            database_name: "crm_hrms_db".to_string(),
            database_timeout: Duration::from_secs(5),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// Create a new SettingsBuilder seeded with defaults
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Load settings from environment variables, falling back to defaults
    ///
    /// The result is validated before it is returned.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let settings = Settings {
            app_name: env_or("APP_NAME", defaults.app_name),
            app_version: defaults.app_version,
            environment: env_or("ENVIRONMENT", defaults.environment),
            debug: env_parse("DEBUG", defaults.debug)?,
            secret_key: env_or("SECRET_KEY", defaults.secret_key),
            algorithm: env_or("ALGORITHM", defaults.algorithm),
            access_token_expire_minutes: env_parse(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                defaults.access_token_expire_minutes,
            )?,
            database_url: env_or("DATABASE_URL", defaults.database_url),
            database_name: env_or("DATABASE_NAME", defaults.database_name),
            database_timeout: Duration::from_secs(env_parse(
                "DATABASE_TIMEOUT_SECS",
                defaults.database_timeout.as_secs(),
            )?),
            bcrypt_cost: env_parse("BCRYPT_COST", defaults.bcrypt_cost)?,
            host: env_or("HOST", defaults.host),
            port: env_parse("PORT", defaults.port)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.is_empty() {
            return Err(ConfigError::MissingValue("SECRET_KEY"));
        }
        if !self.debug && self.secret_key == DEFAULT_SECRET_KEY {
            return Err(ConfigError::InsecureSecret);
        }
        if !HMAC_ALGORITHMS.contains(&self.algorithm.as_str()) {
            return Err(ConfigError::invalid(
                "ALGORITHM",
                &self.algorithm,
                "only HS256, HS384 and HS512 are supported",
            ));
        }
        if self.access_token_expire_minutes <= 0 {
            return Err(ConfigError::invalid(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                self.access_token_expire_minutes,
                "must be positive",
            ));
        }
        if chrono::TimeDelta::try_minutes(self.access_token_expire_minutes).is_none() {
            return Err(ConfigError::invalid(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                self.access_token_expire_minutes,
                "is out of range",
            ));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid(
                "BCRYPT_COST",
                self.bcrypt_cost,
                "must be between 4 and 31",
            ));
        }
        if self.database_timeout.is_zero() {
            return Err(ConfigError::invalid("DATABASE_TIMEOUT_SECS", 0, "must be positive"));
        }
        Ok(())
    }

    /// Default access token lifetime; saturates for settings that skipped `validate`
    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::TimeDelta::try_minutes(self.access_token_expire_minutes)
            .unwrap_or(chrono::TimeDelta::MAX)
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(key, &raw, e)),
        Err(_) => Ok(default),
    }
}

/// Builder for Settings
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn secret_key(mut self, secret: impl Into<String>) -> Self {
        self.settings.secret_key = secret.into();
        self
    }

    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.settings.algorithm = algorithm.into();
        self
    }

    pub fn access_token_expire_minutes(mut self, minutes: i64) -> Self {
        self.settings.access_token_expire_minutes = minutes;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.settings.database_url = url.into();
        self
    }

    pub fn database_timeout(mut self, timeout: Duration) -> Self {
        self.settings.database_timeout = timeout;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.settings.bcrypt_cost = cost;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.settings.debug = debug;
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.settings.environment = environment.into();
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Settings, ConfigError> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("SECRET_KEY must be changed from the default when DEBUG is false")]
    InsecureSecret,
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
