//! Durable local storage.
//!
//! A small localStorage equivalent: string-keyed slots read at startup and
//! rewritten on every relevant mutation. Callers treat writes as
//! infallible; backend failures are logged and swallowed so a missed write
//! degrades to "state not restored on next start" rather than an error the
//! user has to handle.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// Well-known slot keys.
pub mod keys {
    /// Bearer token for the current session.
    pub const TOKEN: &str = "token";

    /// Serialized identity snapshot of the logged-in user.
    pub const USER: &str = "user";

    /// Serialized cart line-item collection.
    pub const CART: &str = "cart";
}

/// String-keyed durable storage slots.
///
/// Implementations must tolerate concurrent reads; the single-threaded
/// mutation model means writes never race each other.
pub trait Storage: Send + Sync {
    /// Read a slot, `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a slot, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Remove a slot if present.
    fn remove(&self, key: &str);
}

/// File-backed storage: one file per key under a data directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read storage slot");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = fs::write(self.slot_path(key), value) {
            tracing::warn!(key, error = %e, "Failed to write storage slot");
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to remove storage slot");
            }
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots
            .read()
            .map(|slots| slots.get(key).cloned())
            .unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "Storage lock poisoned");
                None
            })
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.slots.write() {
            slots.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut slots) = self.slots.write() {
            slots.remove(key);
        }
    }
}
