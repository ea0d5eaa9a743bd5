//! In-memory storage backend
//!
//! Same contract as the redb backend without durability. A single RwLock
//! stands in for the transaction discipline.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::MappingStore;
use crate::allocator::KeyGenerator;
use crate::errors::{Result, ShortenerError};

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ShortenerError::storage("store is closed"));
        }
        Ok(())
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_open()?;
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn lookup(&self, key: &str) -> Result<Option<String>> {
        self.ensure_open()?;
        Ok(self.entries.read().get(key).cloned())
    }

    async fn len(&self) -> usize {
        if self.ensure_open().is_err() {
            return 0;
        }
        self.entries.read().len()
    }

    async fn get_all(&self) -> HashMap<String, String> {
        if self.ensure_open().is_err() {
            return HashMap::new();
        }
        self.entries.read().clone()
    }

    async fn insert_unique(
        &self,
        value: &str,
        generator: Arc<dyn KeyGenerator>,
        key_len: usize,
    ) -> Result<String> {
        self.ensure_open()?;
        let mut entries = self.entries.write();
        let mut key = generator.generate(key_len);
        while entries.contains_key(&key) {
            debug!("Key '{}' already taken", key);
            key = generator.generate(key_len);
        }
        entries.insert(key.clone(), value.to_string());
        Ok(key)
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            warn!("memory storage already closed");
        } else {
            self.entries.write().clear();
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
