//! # Local Store
//!
//! Named slots on the shopper's machine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Local Store                                     │
//! │                                                                         │
//! │  Session startup                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(dir) ← Configure location                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LocalStore::open(config).await ← Readiness gate (creates the dir)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  Directory backend                      │                           │
//! │  │   cartItems.json                        │  one file per slot        │
//! │  │   <key>.json                            │                           │
//! │  ├─────────────────────────────────────────┤                           │
//! │  │  Memory backend (tests)                 │                           │
//! │  │   RwLock<HashMap<key, value>>           │                           │
//! │  └─────────────────────────────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Replace
//! `write_slot` writes `<key>.json.tmp` and renames it over `<key>.json`.
//! A crash mid-write leaves either the old or the new value, never a
//! truncated file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::repository::cart::CartRepository;

/// File extension of slot files.
const SLOT_EXTENSION: &str = "json";

// =============================================================================
// Configuration
// =============================================================================

/// Storage configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/home/me/.local/share/storefront")
///     .create_missing(true);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding slot files. `None` keeps slots in memory.
    pub data_dir: Option<PathBuf>,

    /// Whether to create the data directory on open.
    /// Default: true
    pub create_missing: bool,
}

impl StoreConfig {
    /// Creates a file-backed configuration rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: Some(dir.into()),
            create_missing: true,
        }
    }

    /// Sets whether a missing data directory is created on open.
    pub fn create_missing(mut self, create: bool) -> Self {
        self.create_missing = create;
        self
    }

    /// Creates an in-memory configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = LocalStore::open(StoreConfig::in_memory()).await?;
    /// // Slots vanish with the store, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            data_dir: None,
            create_missing: false,
        }
    }
}

// =============================================================================
// Local Store
// =============================================================================

#[derive(Debug)]
enum Backend {
    Directory(PathBuf),
    Memory(RwLock<HashMap<String, String>>),
}

/// Handle to the opened slot storage.
///
/// Cloning is cheap; clones share the same backend.
#[derive(Debug, Clone)]
pub struct LocalStore {
    backend: Arc<Backend>,
}

impl LocalStore {
    /// Opens the store.
    ///
    /// For a file-backed store this makes sure the data directory exists.
    /// A `LocalStore` therefore only exists once storage is usable, and
    /// nothing can read a slot before that.
    ///
    /// ## Returns
    /// * `Ok(LocalStore)` - Ready-to-use store
    /// * `Err(StoreError::Io)` - Directory missing or not creatable
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        let backend = match config.data_dir {
            Some(dir) => {
                info!(path = %dir.display(), "Opening local store");

                if config.create_missing {
                    tokio::fs::create_dir_all(&dir)
                        .await
                        .map_err(|e| StoreError::io(&dir, e))?;
                }

                let meta = tokio::fs::metadata(&dir)
                    .await
                    .map_err(|e| StoreError::io(&dir, e))?;
                if !meta.is_dir() {
                    return Err(StoreError::io(
                        &dir,
                        std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
                    ));
                }

                Backend::Directory(dir)
            }
            None => {
                info!("Opening in-memory local store");
                Backend::Memory(RwLock::new(HashMap::new()))
            }
        };

        Ok(LocalStore {
            backend: Arc::new(backend),
        })
    }

    /// Path of the data directory, if file-backed.
    pub fn data_dir(&self) -> Option<&Path> {
        match self.backend.as_ref() {
            Backend::Directory(dir) => Some(dir.as_path()),
            Backend::Memory(_) => None,
        }
    }

    /// Reads a slot. A slot that was never written is `Ok(None)`.
    pub async fn read_slot(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;

        match self.backend.as_ref() {
            Backend::Directory(dir) => {
                let path = slot_path(dir, key);
                match tokio::fs::read_to_string(&path).await {
                    Ok(value) => Ok(Some(value)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(StoreError::io(&path, e)),
                }
            }
            Backend::Memory(slots) => Ok(slots.read().await.get(key).cloned()),
        }
    }

    /// Overwrites a slot with `value`.
    pub async fn write_slot(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;

        match self.backend.as_ref() {
            Backend::Directory(dir) => {
                let path = slot_path(dir, key);
                let tmp = path.with_extension(format!("{}.tmp", SLOT_EXTENSION));

                tokio::fs::write(&tmp, value)
                    .await
                    .map_err(|e| StoreError::io(&tmp, e))?;
                tokio::fs::rename(&tmp, &path)
                    .await
                    .map_err(|e| StoreError::io(&path, e))?;
            }
            Backend::Memory(slots) => {
                slots.write().await.insert(key.to_string(), value.to_string());
            }
        }

        debug!(key, bytes = value.len(), "Slot written");
        Ok(())
    }

    /// Deletes a slot. Clearing an empty slot is not an error.
    pub async fn clear_slot(&self, key: &str) -> StoreResult<()> {
        validate_key(key)?;

        match self.backend.as_ref() {
            Backend::Directory(dir) => {
                let path = slot_path(dir, key);
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(StoreError::io(&path, e)),
                }
            }
            Backend::Memory(slots) => {
                slots.write().await.remove(key);
            }
        }

        debug!(key, "Slot cleared");
        Ok(())
    }

    /// Returns the cart repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let cart = store.carts().load().await.unwrap_or_default();
    /// ```
    pub fn carts(&self) -> CartRepository {
        CartRepository::new(self.clone())
    }
}

fn slot_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.{}", key, SLOT_EXTENSION))
}

/// Slot keys become file names, so they are restricted to a safe alphabet.
fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
