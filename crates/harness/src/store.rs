//! Disposable-store lifecycle
//!
//! A [`TestStore`] guards the store a test group runs against: setup opens
//! it, dropping the guard tears it down (closing the connection and deleting
//! any backing tempdir). Production data is protected twice over: the
//! connection string is checked against the production config before any
//! connection is opened, and the common ephemeral paths live in a throwaway
//! temp directory.

use tempfile::TempDir;
use tracing::info;

use inkpost_common::{Result, Store, StoreConfig};

/// Lifecycle guard for a test group's store.
pub struct TestStore {
    store: Store,
    config: StoreConfig,
    // Owns the backing directory for file-based ephemeral stores; removed
    // on drop.
    _tempdir: Option<TempDir>,
}

impl TestStore {
    /// Open the store named by `config` for a test group.
    ///
    /// Fails fast, before connecting, if `config` resolves to the production
    /// connection string. A connection failure here is fatal to the group;
    /// there is no retry.
    pub fn setup(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        config.ensure_disjoint_from(&StoreConfig::production())?;

        let store = Store::open_config(&config)?;
        info!(conn = %config.connection_string, "Test store ready");
        Ok(Self {
            store,
            config,
            _tempdir: None,
        })
    }

    /// The common path: a fresh file-backed store in its own temp directory.
    pub fn ephemeral() -> Result<Self> {
        let tempdir = TempDir::new()?;
        let path = tempdir.path().join("inkpost-test.db");
        let config = StoreConfig::ephemeral_file(path.to_string_lossy());

        let mut guard = Self::setup(config)?;
        guard._tempdir = Some(tempdir);
        Ok(guard)
    }

    /// An in-memory store; fastest, never touches disk.
    pub fn in_memory() -> Result<Self> {
        Self::setup(StoreConfig::ephemeral_memory())
    }

    /// Handle to the store for the duration of the group.
    pub fn store(&self) -> Store {
        self.store.clone()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpost_common::NewPost;

    #[test]
    fn test_ephemeral_store_starts_empty() {
        let group = TestStore::ephemeral().unwrap();
        assert_eq!(group.store().count_posts().unwrap(), 0);
    }

    #[test]
    fn test_setup_refuses_production_connection_string() {
        let production = StoreConfig::production();
        let config = StoreConfig::ephemeral_file(production.connection_string.clone());
        assert!(TestStore::setup(config).is_err());
    }

    #[test]
    fn test_groups_are_isolated() {
        let a = TestStore::ephemeral().unwrap();
        let b = TestStore::ephemeral().unwrap();

        a.store()
            .insert_post(NewPost {
                title: "only in a".to_string(),
                body: String::new(),
            })
            .unwrap();

        assert_eq!(a.store().count_posts().unwrap(), 1);
        assert_eq!(b.store().count_posts().unwrap(), 0);
    }

    #[test]
    fn test_teardown_removes_backing_file() {
        let group = TestStore::ephemeral().unwrap();
        let path = std::path::PathBuf::from(&group.config().connection_string);
        assert!(path.exists());

        drop(group);
        assert!(!path.exists());
    }
}
