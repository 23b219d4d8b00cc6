//! Inkpost Common Library
//!
//! Shared types, configuration, and the post store used by the web
//! application and its test tooling.

pub mod config;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use store::Store;
pub use types::{NewPost, Post};

/// Inkpost version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default store directory
pub fn default_store_path() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".inkpost")
}

/// Default database path
pub fn default_db_path() -> std::path::PathBuf {
    default_store_path().join("blog.db")
}

/// Home directory helper
mod dirs {
    pub fn home_dir() -> Option<std::path::PathBuf> {
        std::env::var_os("HOME").map(std::path::PathBuf::from)
    }
}
