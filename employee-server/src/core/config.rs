use std::path::PathBuf;
use std::str::FromStr;

use shared::EmailPattern;
use thiserror::Error;

use crate::db::store::is_valid_identifier;

/// Which document store backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Embedded SurrealDB on RocksDB under `WORK_DIR/database`
    Surreal,
    /// Process memory, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "surreal" | "surrealdb" | "rocksdb" => Ok(Self::Surreal),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                message: format!("unknown backend '{other}'"),
            }),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | HTTP_PORT | 8080 | HTTP listen port |
/// | ENVIRONMENT | development | Runtime environment |
/// | STORE_BACKEND | surreal | `surreal` or `memory` |
/// | DB_NAMESPACE | employees | SurrealDB namespace |
/// | DB_NAME | directory | SurrealDB database |
/// | COLLECTION_NAME | employees | Document collection |
/// | EMAIL_VALIDATION | legacy | `legacy` or `strict` |
/// | UNIQUE_EMPLOYEE_ID | true | Install a unique index on the employee id |
/// | LOG_LEVEL | info | Log filter |
/// | LOG_JSON | false | Emit JSON log lines |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
///
/// ```ignore
/// HTTP_PORT=9000 STORE_BACKEND=memory cargo run -p employee-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub store_backend: StoreBackend,
    pub db_namespace: String,
    pub db_name: String,
    pub collection_name: String,
    pub email_pattern: EmailPattern,
    pub unique_employee_id: bool,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let http_port = match lookup("HTTP_PORT") {
            Some(p) => p.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "HTTP_PORT",
                message: format!("'{p}' is not a port number"),
            })?,
            None => 8080,
        };

        let email_pattern = get("EMAIL_VALIDATION", "legacy")
            .parse::<EmailPattern>()
            .map_err(|message| ConfigError::Invalid {
                key: "EMAIL_VALIDATION",
                message,
            })?;

        let config = Self {
            work_dir: get("WORK_DIR", "./data"),
            http_port,
            environment: get("ENVIRONMENT", "development"),
            store_backend: get("STORE_BACKEND", "surreal").parse::<StoreBackend>()?,
            db_namespace: get("DB_NAMESPACE", "employees"),
            db_name: get("DB_NAME", "directory"),
            collection_name: get("COLLECTION_NAME", "employees"),
            email_pattern,
            unique_employee_id: parse_bool("UNIQUE_EMPLOYEE_ID", lookup("UNIQUE_EMPLOYEE_ID"), true)?,
            log_level: get("LOG_LEVEL", "info"),
            log_json: parse_bool("LOG_JSON", lookup("LOG_JSON"), false)?,
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_identifier(&self.collection_name) {
            return Err(ConfigError::Invalid {
                key: "COLLECTION_NAME",
                message: format!("'{}' is not a valid identifier", self.collection_name),
            });
        }
        Ok(())
    }

    /// Database directory: work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Log directory, if file logging is enabled
    pub fn log_dir(&self) -> Option<&str> {
        self.log_dir.as_deref()
    }

    /// In-memory configuration for tests
    pub fn in_memory() -> Self {
        Self {
            work_dir: "./data".into(),
            http_port: 0,
            environment: "test".into(),
            store_backend: StoreBackend::Memory,
            db_namespace: "employees".into(),
            db_name: "directory".into(),
            collection_name: "employees".into(),
            email_pattern: EmailPattern::Legacy,
            unique_employee_id: true,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}

fn parse_bool(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_lowercase).as_deref() {
        None => Ok(default),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some("false" | "0" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            key,
            message: format!("'{other}' is not a boolean"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Surreal);
        assert_eq!(config.collection_name, "employees");
        assert_eq!(config.email_pattern, EmailPattern::Legacy);
        assert!(config.unique_employee_id);
        assert_eq!(config.environment, "development");
        assert!(config.log_dir().is_none());
        assert_eq!(config.database_dir(), PathBuf::from("./data").join("database"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HTTP_PORT", "9000"),
            ("STORE_BACKEND", "memory"),
            ("EMAIL_VALIDATION", "STRICT"),
            ("UNIQUE_EMPLOYEE_ID", "off"),
            ("COLLECTION_NAME", "staff"),
            ("ENVIRONMENT", "production"),
            ("LOG_DIR", "/var/log/employees"),
        ])
        .unwrap();
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.email_pattern, EmailPattern::Strict);
        assert!(!config.unique_employee_id);
        assert_eq!(config.collection_name, "staff");
        assert_eq!(config.environment, "production");
        assert_eq!(config.log_dir(), Some("/var/log/employees"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("HTTP_PORT", "eighty")]).is_err());
        assert!(config_from(&[("STORE_BACKEND", "postgres")]).is_err());
        assert!(config_from(&[("EMAIL_VALIDATION", "loose")]).is_err());
        assert!(config_from(&[("UNIQUE_EMPLOYEE_ID", "maybe")]).is_err());
        assert!(config_from(&[("COLLECTION_NAME", "staff; REMOVE TABLE x")]).is_err());
    }
}
