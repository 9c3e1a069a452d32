//! Key-value backed record store.
//!
//! Price reports and listings live under two independent keys, each holding
//! a serialized JSON list. Reads never fail: a missing key is an empty list,
//! and unreadable or corrupt data is logged and treated as empty so the
//! aggregation engine always receives a usable snapshot.

use crate::config;
use crate::error::Result;
use crate::models::{Listing, PriceReport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// StorageBackend
// ---------------------------------------------------------------------------

/// Minimal string key-value interface the record store persists through.
pub trait StorageBackend {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Backend name for logging.
    fn backend_type(&self) -> &'static str;
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileBackend {
    /// Directory holding one file per key.
    pub data_dir: PathBuf,
}

impl FileBackend {
    /// Create a file backend, creating `data_dir` if it does not exist.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { data_dir: dir })
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// Writes to a temp file first and renames on success, so an interrupted
    /// write never leaves a truncated list behind.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let dest = self.path_for(key);
        let tmp_dest = dest.with_extension("json.tmp");

        let result = (|| -> Result<()> {
            fs::write(&tmp_dest, value)?;
            fs::rename(&tmp_dest, &dest)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "file"
    }
}

/// Volatile backend, mostly for tests and one-off sessions.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "memory"
    }
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

/// Owns all price reports and listings.
///
/// Every `load_*` call returns a fresh snapshot; callers never hold
/// references into the store.
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
}

impl RecordStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// A store backed by JSON files in `data_dir`.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Ok(Self::new(Box::new(FileBackend::new(data_dir)?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    pub fn backend_type(&self) -> &'static str {
        self.backend.backend_type()
    }

    // -- Price reports -----------------------------------------------------

    pub fn load_prices(&self) -> Vec<PriceReport> {
        self.load_list(config::STORAGE_PRICES)
    }

    pub fn save_prices(&self, reports: &[PriceReport]) -> Result<()> {
        self.save_list(config::STORAGE_PRICES, reports)
    }

    pub fn clear_prices(&self) -> Result<()> {
        self.backend.remove(config::STORAGE_PRICES)
    }

    // -- Listings ----------------------------------------------------------

    pub fn load_listings(&self) -> Vec<Listing> {
        self.load_list(config::STORAGE_LISTINGS)
    }

    pub fn save_listings(&self, listings: &[Listing]) -> Result<()> {
        self.save_list(config::STORAGE_LISTINGS, listings)
    }

    pub fn clear_listings(&self) -> Result<()> {
        self.backend.remove(config::STORAGE_LISTINGS)
    }

    // -- Generic list persistence ------------------------------------------

    /// Load and parse the list stored under `key`.
    ///
    /// Read errors and corrupt JSON are logged and recovered as an empty list.
    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, backend = self.backend_type(), error = %e, "failed to read records; using empty list");
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(key, backend = self.backend_type(), error = %e, "corrupt records; using empty list");
                Vec::new()
            }
        }
    }

    fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.backend.set(key, &json)
    }
}

/// Allocate an id for a record created at `now_ms`.
///
/// Ids are time based but forced strictly above every existing id, so two
/// records created within the same millisecond still get distinct ids.
pub fn next_id<I: IntoIterator<Item = i64>>(existing: I, now_ms: i64) -> i64 {
    match existing.into_iter().max() {
        Some(max) if max >= now_ms => max + 1,
        _ => now_ms,
    }
}
