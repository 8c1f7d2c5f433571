use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::backend::database::DatabaseBackendConfig;

/// Default location of the SQLite file
pub const DEFAULT_DATABASE_URL: &str = "sqlite:db.sqlite";

lazy_static! {
    static ref ENV_VAR_PATTERN: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").unwrap();
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Acquire timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Let SQLite enforce the declared order foreign keys
    #[serde(default)]
    pub foreign_keys: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    /// Answer 404 when an update or delete matches no row instead of acknowledging it
    #[serde(default)]
    pub strict_writes: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_connection_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            foreign_keys: false,
        }
    }
}

impl DatabaseConfig {
    /// Backend-facing view of this section
    pub fn to_backend_config(&self) -> DatabaseBackendConfig {
        DatabaseBackendConfig::new(self.url.clone())
            .with_max_connections(self.max_connections)
            .with_connection_timeout(self.connection_timeout)
            .with_foreign_keys(self.foreign_keys)
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, expanding `${VAR}` references first
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, String> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(format!("Configuration file not found: {}", path.display()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        Self::from_yaml_str(&content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, String> {
        let expanded = Self::expand_env_vars(content)?;
        serde_yaml::from_str(&expanded).map_err(|e| e.to_string())
    }

    /// Configuration used when no file is present: local SQLite file, compatibility writes
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Expand `${VAR_NAME}` or `${VAR_NAME:-default}`
    fn expand_env_vars(content: &str) -> Result<String, String> {
        let mut expanded = String::with_capacity(content.len());
        let mut last = 0;

        for caps in ENV_VAR_PATTERN.captures_iter(content) {
            let whole = caps.get(0).ok_or("Invalid environment variable reference")?;
            let var_name = &caps[1];

            let value = match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => match caps.get(2) {
                    Some(default) => default.as_str().to_string(),
                    None => {
                        return Err(format!(
                            "Environment variable {} not found and no default provided",
                            var_name
                        ))
                    }
                },
            };

            expanded.push_str(&content[last..whole.start()]);
            expanded.push_str(&value);
            last = whole.end();
        }

        expanded.push_str(&content[last..]);
        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default_config();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.url, "sqlite:db.sqlite");
        assert!(!config.database.foreign_keys);
        assert!(!config.api.strict_writes);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = AppConfig::from_yaml_str(
            r#"
server:
  port: 9090
api:
  strict_writes: true
"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.api.strict_writes);
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("DOSA_TEST_DB_URL", "sqlite:test-orders.db");

        let config = AppConfig::from_yaml_str(
            r#"
database:
  url: "${DOSA_TEST_DB_URL}"
  foreign_keys: ${DOSA_TEST_UNSET_FK:-true}
"#,
        )
        .unwrap();

        assert_eq!(config.database.url, "sqlite:test-orders.db");
        assert!(config.database.foreign_keys);

        let backend = config.database.to_backend_config();
        assert_eq!(backend.connection_url, "sqlite:test-orders.db");
        assert!(backend.foreign_keys);
    }

    #[test]
    fn test_missing_env_var_without_default() {
        let result = AppConfig::expand_env_vars("url: ${DOSA_TEST_DEFINITELY_UNSET}");
        assert!(result.is_err());
    }

    #[test]
    fn test_text_without_references_is_untouched() {
        let content = "server:\n  host: \"$HOME\"\n";
        assert_eq!(AppConfig::expand_env_vars(content).unwrap(), content);
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load_from_file("/nonexistent/path/config.yaml");
        assert!(result.is_err());
    }
}
