//! Durable key-value store backed by sled
//!
//! Values are stored as raw UTF-8 so a key's on-disk value is exactly the
//! literal string written to it (the theme key holds `light` or `dark`,
//! nothing else).

use sled::Db;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Stored bytes are not valid UTF-8
    #[error("Stored value is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Storage refuses access (disabled, private browsing, sandboxed)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Write would exceed the storage quota
    #[error("Quota exceeded: {needed} bytes needed, {quota} bytes allowed")]
    QuotaExceeded {
        /// Bytes the store would hold after the write
        needed: usize,
        /// Configured quota
        quota: usize,
    },
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: PathBuf,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for flush on demand only)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("navbar_kv.db"),
            cache_capacity: 1024 * 1024, // 1MB, the store holds a handful of keys
            use_compression: false,
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Key-value store implementation
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore").field("len", &self.db.len()).finish()
    }
}

impl KvStore {
    /// Open a key-value store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let mut db_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression);

        if let Some(ms) = config.flush_every_ms {
            db_config = db_config.flush_every_ms(Some(ms));
        }

        let db = db_config.open()?;
        tracing::debug!(path = %config.path.display(), "opened key-value store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create a temporary key-value store (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Get the literal value stored under a key
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        match self.db.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(String::from_utf8(bytes.to_vec())?)),
            None => Ok(None),
        }
    }

    /// Store a literal value under a key
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    /// Remove a value by key
    pub fn remove(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.db.contains_key(key.as_bytes())?)
    }

    /// Clear all data
    pub fn clear(&self) -> Result<()> {
        self.db.clear()?;
        Ok(())
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Get the number of keys in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

/// Keys are short printable identifiers
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.chars().any(char::is_control) {
        return Err(KvError::InvalidKey(key.escape_debug().to_string()));
    }
    Ok(())
}
