//! redb storage backend
//!
//! A single `urls` table inside one redb file. redb gives us MVCC reads and a
//! single serialized writer, which is exactly the discipline the store
//! contract asks for. All engine calls run on tokio's blocking pool.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::MappingStore;
use crate::allocator::KeyGenerator;
use crate::errors::{Result, ShortenerError};

/// Key: short key, Value: target URL
const URLS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("urls");

pub struct RedbStore {
    /// None 表示已关闭。每个操作在完成前持有读锁，close 取写锁
    db: RwLock<Option<Arc<Database>>>,
    path: PathBuf,
}

impl RedbStore {
    /// Create or open the database file and make sure the table exists.
    ///
    /// Every failure here is [`ShortenerError::FatalStartup`]: there is no
    /// degraded mode without the table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShortenerError::fatal_startup(format!(
                    "无法创建数据目录 {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let db = Database::create(&path).map_err(|e| {
            ShortenerError::fatal_startup(format!(
                "无法打开数据库文件 {}: {}",
                path.display(),
                e
            ))
        })?;

        let fatal = |e: &dyn std::fmt::Display| {
            ShortenerError::fatal_startup(format!("无法创建 urls 表: {}", e))
        };
        let write_txn = db.begin_write().map_err(|e| fatal(&e))?;
        {
            write_txn.open_table(URLS_TABLE).map_err(|e| fatal(&e))?;
        }
        write_txn.commit().map_err(|e| fatal(&e))?;

        info!("redb storage opened at {}", path.display());
        Ok(Self {
            db: RwLock::new(Some(Arc::new(db))),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a synchronous engine operation on the blocking pool.
    ///
    /// The read guard is held until the blocking task has finished, which is
    /// what lets `close` wait for in-flight work.
    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let guard = self.db.read().await;
        let db = guard
            .clone()
            .ok_or_else(|| ShortenerError::storage("store is closed"))?;
        let result = tokio::task::spawn_blocking(move || op(&db)).await?;
        drop(guard);
        result
    }
}

fn put(db: &Database, key: &str, value: &str) -> Result<()> {
    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(URLS_TABLE)?;
        table.insert(key, value)?;
    }
    write_txn.commit()?;
    Ok(())
}

fn fetch(db: &Database, key: &str) -> Result<Option<String>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(URLS_TABLE)?;
    let value = table.get(key)?.map(|v| v.value().to_string());
    Ok(value)
}

fn count(db: &Database) -> Result<usize> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(URLS_TABLE)?;
    Ok(table.len()? as usize)
}

fn snapshot(db: &Database) -> Result<HashMap<String, String>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(URLS_TABLE)?;

    let mut all = HashMap::new();
    for item in table.iter()? {
        let (key, value) = item?;
        all.insert(key.value().to_string(), value.value().to_string());
    }
    Ok(all)
}

fn insert_fresh(
    db: &Database,
    value: &str,
    generator: &dyn KeyGenerator,
    key_len: usize,
) -> Result<String> {
    let write_txn = db.begin_write()?;
    let key = {
        let mut table = write_txn.open_table(URLS_TABLE)?;
        let mut attempts = 1u64;
        let mut key = generator.generate(key_len);
        // 同一写事务内检查，其他写者在提交前无法插入
        while table.get(key.as_str())?.is_some() {
            debug!("Key '{}' already taken (attempt {})", key, attempts);
            attempts += 1;
            key = generator.generate(key_len);
        }
        table.insert(key.as_str(), value)?;
        key
    };
    write_txn.commit()?;
    Ok(key)
}

#[async_trait]
impl MappingStore for RedbStore {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let (key, value) = (key.to_string(), value.to_string());
        self.blocking(move |db| put(db, &key, &value)).await
    }

    async fn lookup(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |db| fetch(db, &key)).await
    }

    async fn len(&self) -> usize {
        match self.blocking(count).await {
            Ok(n) => n,
            Err(e) => {
                error!("统计短链接数量失败: {}", e);
                0
            }
        }
    }

    async fn get_all(&self) -> HashMap<String, String> {
        match self.blocking(snapshot).await {
            Ok(all) => {
                debug!("Loaded {} mappings", all.len());
                all
            }
            Err(e) => {
                error!("加载所有短链接失败: {}", e);
                HashMap::new()
            }
        }
    }

    async fn insert_unique(
        &self,
        value: &str,
        generator: Arc<dyn KeyGenerator>,
        key_len: usize,
    ) -> Result<String> {
        let value = value.to_string();
        self.blocking(move |db| insert_fresh(db, &value, generator.as_ref(), key_len))
            .await
    }

    async fn close(&self) -> Result<()> {
        // 写锁要等所有持有读锁的操作结束才能拿到
        let taken = self.db.write().await.take();
        match taken {
            Some(db) => {
                // 被取消的调用方可能留下仍在运行的阻塞任务
                if Arc::strong_count(&db) > 1 {
                    debug!("waiting for detached tasks to release the redb handle");
                }
                while Arc::strong_count(&db) > 1 {
                    tokio::task::yield_now().await;
                }
                drop(db);
                info!("redb storage at {} closed", self.path.display());
            }
            None => warn!("redb storage at {} already closed", self.path.display()),
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redb"
    }
}
