//! Error types for loading snapshots and resolving inventory lookups

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading snapshots or querying the inventory
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Failed to read snapshot {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Invalid blocklist configuration: {0}")]
    Config(String),
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
