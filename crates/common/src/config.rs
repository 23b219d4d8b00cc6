//! Store configuration
//!
//! The web binary and the test tooling both open the post store through a
//! `StoreConfig`. Production resolves from `INKPOST_DB` (or the default
//! path under `~/.inkpost`); disposable test stores are constructed
//! explicitly and must never resolve to the production connection string.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Special connection string for an in-memory SQLite store.
pub const MEMORY_CONN: &str = ":memory:";

/// Environment variable naming the production database file.
pub const DB_ENV: &str = "INKPOST_DB";

/// Where a post store lives and whether it is throwaway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite file, or `:memory:`.
    pub connection_string: String,

    /// Ephemeral stores hold test data only and are deleted after use.
    pub ephemeral: bool,
}

impl StoreConfig {
    /// Production configuration: `INKPOST_DB` or the default path.
    pub fn production() -> Self {
        let connection_string = std::env::var(DB_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| crate::default_db_path().to_string_lossy().into_owned());
        Self {
            connection_string,
            ephemeral: false,
        }
    }

    /// Ephemeral configuration backed by a file at `path`.
    pub fn ephemeral_file(path: impl Into<String>) -> Self {
        Self {
            connection_string: path.into(),
            ephemeral: true,
        }
    }

    /// Ephemeral in-memory configuration.
    pub fn ephemeral_memory() -> Self {
        Self {
            connection_string: MEMORY_CONN.to_string(),
            ephemeral: true,
        }
    }

    pub fn is_memory(&self) -> bool {
        self.connection_string == MEMORY_CONN
    }

    /// Hard precondition for test setups: an ephemeral store must not point
    /// at the production connection string. Checked before any connection
    /// is opened.
    pub fn ensure_disjoint_from(&self, production: &StoreConfig) -> Result<()> {
        if self.connection_string == production.connection_string {
            return Err(Error::StoreCollision(self.connection_string.clone()));
        }
        Ok(())
    }

    /// Validate the config shape itself.
    pub fn validate(&self) -> Result<()> {
        if self.connection_string.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "store connection string is empty".to_string(),
            ));
        }
        if self.is_memory() && !self.ephemeral {
            return Err(Error::InvalidConfig(
                "in-memory store must be marked ephemeral".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_is_rejected() {
        let production = StoreConfig {
            connection_string: "/var/lib/inkpost/blog.db".to_string(),
            ephemeral: false,
        };
        let test = StoreConfig::ephemeral_file("/var/lib/inkpost/blog.db");

        let err = test.ensure_disjoint_from(&production).unwrap_err();
        assert!(matches!(err, Error::StoreCollision(_)));
    }

    #[test]
    fn test_disjoint_configs_pass() {
        let production = StoreConfig {
            connection_string: "/var/lib/inkpost/blog.db".to_string(),
            ephemeral: false,
        };
        let test = StoreConfig::ephemeral_memory();

        assert!(test.ensure_disjoint_from(&production).is_ok());
        assert!(test.validate().is_ok());
    }

    #[test]
    fn test_empty_connection_string_is_invalid() {
        let cfg = StoreConfig {
            connection_string: "  ".to_string(),
            ephemeral: true,
        };
        assert!(matches!(
            cfg.validate().unwrap_err(),
            Error::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_memory_must_be_ephemeral() {
        let cfg = StoreConfig {
            connection_string: MEMORY_CONN.to_string(),
            ephemeral: false,
        };
        assert!(cfg.validate().is_err());
    }
}
