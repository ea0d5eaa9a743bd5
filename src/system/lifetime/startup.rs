use std::sync::Arc;

use tracing::error;

use crate::allocator::KeyAllocator;
use crate::config::StaticConfig;
use crate::errors::Result;
use crate::storage::{MappingStore, StorageFactory};

/// Everything a caller needs once the store is open.
pub struct StartupContext {
    pub store: Arc<dyn MappingStore>,
    pub allocator: KeyAllocator,
}

/// 打开存储并构建分配器
///
/// Returns the error instead of exiting so callers (and tests) decide how to
/// abort; see [`prepare_or_exit`].
pub fn prepare_startup(config: &StaticConfig) -> Result<StartupContext> {
    let store = StorageFactory::create(&config.database)?;
    let allocator = KeyAllocator::with_default_generator(store.clone());
    Ok(StartupContext { store, allocator })
}

/// Like [`prepare_startup`], but terminates the process when the store
/// cannot be initialized.
pub fn prepare_or_exit(config: &StaticConfig) -> StartupContext {
    match prepare_startup(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    }
}
