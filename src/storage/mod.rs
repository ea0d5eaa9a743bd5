//! Mapping store
//!
//! Durable key → target storage. Backends know nothing about URLs; they only
//! hold opaque strings and, for [`MappingStore::insert_unique`], draw
//! candidate keys from whatever generator they are handed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::allocator::KeyGenerator;
use crate::config::DatabaseConfig;
use crate::errors::{Result, ShortenerError};

pub mod memory;
pub mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

/// Capability set every mapping backend exposes.
///
/// Each call is its own transaction. Reads (`get`, `len`, `get_all`) run
/// against a consistent snapshot; writes (`set`, `insert_unique`) serialize.
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Write or overwrite `key`. Visible to later readers only once committed.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Direct lookup that reports engine failures instead of hiding them.
    async fn lookup(&self, key: &str) -> Result<Option<String>>;

    /// Direct lookup. Returns an empty string when `key` is absent; engine
    /// failures are logged and read as absent too.
    async fn get(&self, key: &str) -> String {
        match self.lookup(key).await {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                error!("查询短链接失败 ({}): {}", key, e);
                String::new()
            }
        }
    }

    /// Number of stored entries.
    async fn len(&self) -> usize;

    /// Snapshot of every entry.
    async fn get_all(&self) -> HashMap<String, String>;

    /// Draw keys from `generator` until one is free, then store `value` under
    /// it. Check and insert happen in the same write transaction, so the
    /// returned key is never handed to another caller.
    async fn insert_unique(
        &self,
        value: &str,
        generator: Arc<dyn KeyGenerator>,
        key_len: usize,
    ) -> Result<String>;

    /// Release the underlying handle. The store is unusable afterwards.
    ///
    /// Waits for operations already running against the handle, so once this
    /// returns the same path can be opened again.
    async fn close(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: &DatabaseConfig) -> Result<Arc<dyn MappingStore>> {
        let store: Arc<dyn MappingStore> = match config.backend.as_str() {
            "redb" => Arc::new(RedbStore::open(&config.path)?),
            "memory" => Arc::new(MemoryStore::new()),
            other => {
                return Err(ShortenerError::fatal_startup(format!(
                    "未知的存储后端: {}. 支持的后端: redb, memory",
                    other
                )));
            }
        };

        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}
