//! Short key allocation
//!
//! Validates a target URL and hands out an 8-letter key that is not yet in
//! the store.

mod generator;

use std::sync::Arc;

use tracing::debug;

pub use generator::{ALPHABET, KeyGenerator, RandomGenerator, SequenceGenerator};

use crate::errors::Result;
use crate::storage::MappingStore;
use crate::utils::url_validator::validate_target;

/// Length of every allocated key.
pub const KEY_LENGTH: usize = 8;

pub struct KeyAllocator {
    store: Arc<dyn MappingStore>,
    generator: Arc<dyn KeyGenerator>,
}

impl KeyAllocator {
    pub fn new(generator: Arc<dyn KeyGenerator>, store: Arc<dyn MappingStore>) -> Self {
        Self { store, generator }
    }

    pub fn with_default_generator(store: Arc<dyn MappingStore>) -> Self {
        Self::new(Arc::new(RandomGenerator::new()), store)
    }

    /// Return a key that is free at the moment it is checked.
    ///
    /// Read-only: the caller still has to `set` the pair. Two concurrent
    /// callers may get the same key before either writes it, and the later
    /// `set` silently wins. Use [`KeyAllocator::allocate_and_store`] when that
    /// matters.
    ///
    /// The target is only validated; the stored string should be `target`
    /// itself, not a re-encoded form. A store that cannot answer the free-key
    /// check fails the call with its `Storage` error.
    pub async fn allocate(&self, target: &str) -> Result<String> {
        validate_target(target)?;

        let mut key = self.generator.generate(KEY_LENGTH);
        while self.store.lookup(&key).await?.is_some() {
            debug!("Key '{}' already taken, generating another", key);
            key = self.generator.generate(KEY_LENGTH);
        }

        Ok(key)
    }

    /// Validate `target`, allocate a key and persist the pair atomically.
    ///
    /// The free-key check and the insert share one write transaction, so the
    /// returned key is guaranteed unique even under concurrent callers.
    pub async fn allocate_and_store(&self, target: &str) -> Result<String> {
        validate_target(target)?;

        let key = self
            .store
            .insert_unique(target, self.generator.clone(), KEY_LENGTH)
            .await?;
        debug!("Allocated '{}' -> {}", key, target);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ShortenerError;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_invalid_target_never_touches_generator() {
        let generator = Arc::new(SequenceGenerator::new(["aaaaaaaa"]));
        let allocator = KeyAllocator::new(generator.clone(), Arc::new(MemoryStore::new()));

        let err = allocator.allocate("not a url").await.unwrap_err();
        assert!(matches!(err, ShortenerError::Validation(_)));
        let err = allocator.allocate_and_store("").await.unwrap_err();
        assert!(matches!(err, ShortenerError::Validation(_)));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_allocate_retries_on_collision() {
        let store = Arc::new(MemoryStore::new());
        store.set("aaaaaaaa", "https://a.example").await.unwrap();
        store.set("bbbbbbbb", "https://b.example").await.unwrap();

        let generator = Arc::new(SequenceGenerator::new(["aaaaaaaa", "bbbbbbbb", "cccccccc"]));
        let allocator = KeyAllocator::new(generator.clone(), store.clone());

        assert_eq!(allocator.allocate("https://c.example").await.unwrap(), "cccccccc");
        assert_eq!(generator.calls(), 3);
        // allocate 不写入
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_allocate_surfaces_store_failure() {
        let store = Arc::new(MemoryStore::new());
        let generator = Arc::new(SequenceGenerator::new(["aaaaaaaa"]));
        let allocator = KeyAllocator::new(generator.clone(), store.clone());
        store.close().await.unwrap();

        // 查询失败不能被当成“键空闲”
        let err = allocator.allocate("https://a.example").await.unwrap_err();
        assert!(matches!(err, ShortenerError::Storage(_)));
        assert_eq!(generator.calls(), 1);
    }
}
