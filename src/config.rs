//! Configuration module
//!
//! Settings are read from a TOML file (by default
//! `~/.config/catalogue/config.toml`). Every section and field is optional;
//! missing values take the defaults below.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! url = "sqlite://./catalogue.db?mode=rwc"   # or "memory"
//!
//! [security]
//! jwt_secret = "change-me"
//!
//! [pagination]
//! max_page_size = 100
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [admin]
//! email = "admin@catalogue.local"
//! birth_date = "1970-01-01"
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::MAX_PAGE_SIZE;

/// `database.url` value selecting the in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("catalogue")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SeaORM connection URL, or `"memory"` for the in-memory store
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./catalogue.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_DATABASE_URL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_expiration_hours: 24,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Largest accepted `pageSize`
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Account created on startup when no user exists yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth_date: NaiveDate,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            email: "admin@catalogue.local".to_string(),
            password: "admin12345".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default(),
        }
    }
}

impl AppConfig {
    /// Read `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(io_err)
    }

    /// Apply `DATABASE_URL` and `JWT_SECRET` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET").filter(|v| !v.is_empty()) {
            self.security.jwt_secret = secret;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "pagination.max_page_size must be at least 1".into(),
            ));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "security.bcrypt_cost must be between 4 and 31".into(),
            ));
        }
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("catalogue-config-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = AppConfig::load(&temp_path("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.pagination.max_page_size, 100);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [database]
            url = "memory"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.database.is_memory());
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("config.toml");
        let mut config = AppConfig::default();
        config.admin.birth_date = NaiveDate::from_ymd_opt(1985, 6, 30).unwrap();
        config.pagination.max_page_size = 50;

        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn rejects_zero_page_size() {
        let path = temp_path("config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[pagination]\nmax_page_size = 0\n").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Invalid(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let path = temp_path("config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[server\nport = ").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse { .. })));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn overrides_replace_non_empty_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".into()),
            "JWT_SECRET" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.security.jwt_secret, SecurityConfig::default().jwt_secret);
    }
}
