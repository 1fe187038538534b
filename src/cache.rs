//! Hash-validated file cache for analysis results.
//!
//! One JSON file per cached source file, stored in a configurable directory
//! (default: the platform cache dir). An entry is valid only when its stored
//! content hash matches the current hash of the file it describes. There is
//! no TTL, no size bound and no eviction; the cache is a best-effort
//! acceleration layer, never a source of truth.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::facts::FileFacts;

/// A cached analysis result plus the hash used to validate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    hash: String,
    facts: FileFacts,
}

/// File-based cache keyed by project-relative path.
///
/// All operations fail soft: read, parse and write errors reduce to cache
/// misses. Same-key races are last-writer-wins; extraction is a pure
/// function of file content, so a redundant write is wasteful, not wrong.
pub struct AnalysisCache {
    /// Cache directory, or `None` when caching is disabled.
    dir: Option<PathBuf>,
}

impl AnalysisCache {
    /// Create a cache rooted at `dir`, creating the directory if needed.
    ///
    /// Falls back to a disabled cache when the directory cannot be created.
    pub fn new(dir: PathBuf) -> Self {
        match fs::create_dir_all(&dir) {
            Ok(()) => Self { dir: Some(dir) },
            Err(_) => Self { dir: None },
        }
    }

    /// Create a cache that never hits and never stores.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    /// Whether this cache can store entries.
    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// Look up the entry for `key`, returning facts only when the stored
    /// hash equals `hash`.
    pub fn get(&self, key: &str, hash: &str) -> Option<FileFacts> {
        let path = self.entry_path(key)?;
        let content = fs::read_to_string(path).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;
        if entry.hash == hash {
            Some(entry.facts)
        } else {
            None
        }
    }

    /// Store `facts` under `key`, tagged with `hash`. Write errors are
    /// swallowed; the caller proceeds as if the result were not cached.
    pub fn put(&self, key: &str, hash: &str, facts: &FileFacts) {
        let Some(path) = self.entry_path(key) else {
            return;
        };
        let entry = CacheEntry {
            hash: hash.to_string(),
            facts: facts.clone(),
        };
        if let Ok(content) = serde_json::to_string(&entry) {
            let _ = fs::write(path, content);
        }
    }

    /// Path of the entry file for a key.
    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| {
            // Sanitize key for filename (path separators and drive colons)
            let filename = key.replace(['/', '\\', ':'], "_");
            dir.join(format!("{}.json", filename))
        })
    }
}

/// SHA-256 hex digest of raw file content.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
