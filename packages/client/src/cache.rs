//! On-disk response cache.
//!
//! Each entry is a JSON file named after the SHA-256 of its key, holding the
//! value together with its creation and expiry times. Unreadable or corrupt
//! entries are treated as misses and removed.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};

use crate::error::{BggError, Result};

/// File extension of cache entries.
const ENTRY_EXTENSION: &str = "json";

/// Longest key prefix written to logs.
const LOG_KEY_LEN: usize = 50;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    value: T,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

fn short(key: &str) -> &str {
    match key.char_indices().nth(LOG_KEY_LEN) {
        Some((idx, _)) => &key[..idx],
        None => key,
    }
}

/// File-backed cache with per-entry time-to-live.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    enabled: bool,
}

impl FileCache {
    /// Open a cache in `dir`, creating the directory when enabled.
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Result<Self> {
        let dir = dir.into();
        if enabled {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir, enabled })
    }

    /// Cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether reads and writes are active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{digest:x}.{ENTRY_EXTENSION}"))
    }

    /// Get a live entry. Missing, expired and corrupt entries are misses.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }

        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(key = short(key), "Cache miss");
                return None;
            }
            Err(e) => {
                error!(key = short(key), error = %e, "Cache read error");
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry<T>>(&raw) {
            Ok(entry) if entry.is_expired() => {
                debug!(key = short(key), "Cache expired");
                remove_quietly(&path);
                None
            }
            Ok(entry) => {
                debug!(key = short(key), "Cache hit");
                Some(entry.value)
            }
            Err(e) => {
                error!(key = short(key), error = %e, "Corrupt cache entry");
                remove_quietly(&path);
                None
            }
        }
    }

    /// Store `value` under `key` for `ttl`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| BggError::Cache(format!("invalid TTL: {e}")))?;
        let created_at = Utc::now();
        let expires_at = created_at
            .checked_add_signed(ttl)
            .ok_or_else(|| BggError::Cache("TTL out of range".to_string()))?;
        let entry = CacheEntry {
            value,
            created_at,
            expires_at,
        };

        let path = self.entry_path(key);
        let json = serde_json::to_string(&entry)?;
        fs::write(&path, json).map_err(|e| {
            remove_quietly(&path);
            BggError::Cache(format!("failed to write cache for key {}: {e}", short(key)))
        })?;

        debug!(key = short(key), "Cache set");
        Ok(())
    }

    /// Remove every entry. Returns the number of entries removed.
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION) {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }

        info!(removed, "Cache cleared");
        Ok(removed)
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            debug!(path = %path.display(), error = %e, "Could not remove cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache() -> (TempDir, FileCache) {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path(), true).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_set_then_get() {
        let (_dir, cache) = cache();
        cache
            .set("thing?id=13", &"<items/>".to_string(), Duration::from_secs(60))
            .unwrap();
        assert_eq!(cache.get::<String>("thing?id=13"), Some("<items/>".to_string()));
        assert_eq!(cache.get::<String>("thing?id=14"), None);
    }

    #[test]
    fn test_set_with_huge_ttl_is_error() {
        let (_dir, cache) = cache();
        let result = cache.set("k", &1u32, Duration::from_secs(9_000_000_000_000_000));
        assert!(matches!(result, Err(BggError::Cache(_))));
        assert_eq!(cache.get::<u32>("k"), None);
    }

    #[test]
    fn test_expired_entry_is_miss_and_removed() {
        let (_dir, cache) = cache();
        cache.set("k", &1u32, Duration::ZERO).unwrap();
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(cache.get::<u32>("k"), None);
        assert!(!cache.entry_path("k").exists());
    }

    #[test]
    fn test_corrupt_entry_is_miss_and_removed() {
        let (_dir, cache) = cache();
        let path = cache.entry_path("k");
        fs::write(&path, "not json at all").unwrap();

        assert_eq!(cache.get::<String>("k"), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_wrong_type_is_miss() {
        let (_dir, cache) = cache();
        cache.set("k", &"text", Duration::from_secs(60)).unwrap();
        assert_eq!(cache.get::<u32>("k"), None);
    }

    #[test]
    fn test_disabled_cache_is_inert() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("never"), false).unwrap();

        cache.set("k", &1u32, Duration::from_secs(60)).unwrap();
        assert_eq!(cache.get::<u32>("k"), None);
        assert!(!dir.path().join("never").exists());
    }

    #[test]
    fn test_clear() {
        let (_dir, cache) = cache();
        cache.set("a", &1u32, Duration::from_secs(60)).unwrap();
        cache.set("b", &2u32, Duration::from_secs(60)).unwrap();

        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.get::<u32>("a"), None);
    }
}
