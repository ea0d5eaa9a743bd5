use std::sync::Arc;

use tracing::{error, info};

use crate::storage::MappingStore;

/// 关闭存储，释放文件句柄
///
/// Called once at orderly exit. A close failure is logged, not propagated:
/// there is nothing left to do with the store either way.
pub async fn release_store(store: Arc<dyn MappingStore>) {
    match store.close().await {
        Ok(()) => info!("{} storage released", store.backend_name()),
        Err(e) => error!("Error while releasing storage: {}", e),
    }
}
