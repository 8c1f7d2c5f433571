/// Configuration for the SQLite backend
///
/// This is the backend-facing view of the `database` section of the
/// application config. It carries everything needed to open the pool.
#[derive(Debug, Clone)]
pub struct DatabaseBackendConfig {
    /// Connection URL for the store
    /// Examples:
    /// - "sqlite:db.sqlite"
    /// - "sqlite::memory:" or ":memory:"
    pub connection_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub connection_timeout: u64,

    /// Whether SQLite enforces the declared foreign keys
    pub foreign_keys: bool,
}

impl DatabaseBackendConfig {
    pub fn new(connection_url: String) -> Self {
        Self {
            connection_url,
            max_connections: 5,
            connection_timeout: 30,
            foreign_keys: false,
        }
    }

    /// Create an in-memory SQLite configuration for testing
    pub fn memory_sqlite() -> Self {
        Self::new("sqlite::memory:".to_string()).with_max_connections(1)
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_connection_timeout(mut self, timeout_seconds: u64) -> Self {
        self.connection_timeout = timeout_seconds;
        self
    }

    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Check if this is an in-memory database
    pub fn is_memory_database(&self) -> bool {
        self.connection_url == ":memory:"
            || self.connection_url == "sqlite::memory:"
            || self.connection_url.contains("mode=memory")
    }

    /// URL in the form sqlx expects, accepting bare file paths as well
    pub fn sqlx_url(&self) -> String {
        if self.connection_url == ":memory:" {
            "sqlite::memory:".to_string()
        } else if self.connection_url.starts_with("sqlite:") {
            self.connection_url.clone()
        } else {
            format!("sqlite:{}", self.connection_url)
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.connection_url.is_empty() {
            return Err("Connection URL cannot be empty".to_string());
        }

        if self.max_connections == 0 {
            return Err("Max connections must be greater than 0".to_string());
        }

        if !self.connection_url.starts_with("sqlite:")
            && self.connection_url != ":memory:"
            && !self.connection_url.ends_with(".db")
            && !self.connection_url.ends_with(".sqlite")
        {
            return Err("SQLite connection URL must start with 'sqlite:', be ':memory:', or end with '.db' or '.sqlite'".to_string());
        }

        Ok(())
    }
}

impl Default for DatabaseBackendConfig {
    fn default() -> Self {
        Self::new("sqlite:db.sqlite".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_well_known_file() {
        let config = DatabaseBackendConfig::default();
        assert_eq!(config.connection_url, "sqlite:db.sqlite");
        assert!(!config.foreign_keys);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_config() {
        let config = DatabaseBackendConfig::memory_sqlite();

        assert!(config.is_memory_database());
        assert_eq!(config.max_connections, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sqlx_url_normalization() {
        assert_eq!(
            DatabaseBackendConfig::new(":memory:".to_string()).sqlx_url(),
            "sqlite::memory:"
        );
        assert_eq!(
            DatabaseBackendConfig::new("orders.db".to_string()).sqlx_url(),
            "sqlite:orders.db"
        );
        assert_eq!(
            DatabaseBackendConfig::new("sqlite:db.sqlite".to_string()).sqlx_url(),
            "sqlite:db.sqlite"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = DatabaseBackendConfig::new("".to_string());
        assert!(config.validate().is_err());

        config.connection_url = "postgres://localhost/orders".to_string();
        assert!(config.validate().is_err());

        config.connection_url = "sqlite:orders.db".to_string();
        assert!(config.validate().is_ok());

        config.max_connections = 0;
        assert!(config.validate().is_err());
    }
}
