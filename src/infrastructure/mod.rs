//! Storage adapters implementing [`LimitStore`](crate::domain::ports::LimitStore).

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

use crate::domain::ports::LimitStoreBox;
use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Builds the limit store selected by configuration.
///
/// A `db_path` selects RocksDB. Without the `storage-rocksdb` feature the path
/// is ignored with a warning and records live in memory.
pub fn open_store(db_path: Option<&Path>) -> Result<LimitStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = rocksdb::RocksDBLimitStore::open(path)?;
            info!(path = %path.display(), "using RocksDB limit store");
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(path) => {
            tracing::warn!(
                path = %path.display(),
                "persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled; falling back to in-memory storage"
            );
            Ok(Box::new(in_memory::InMemoryLimitStore::new()))
        }
        None => {
            info!("using in-memory limit store");
            Ok(Box::new(in_memory::InMemoryLimitStore::new()))
        }
    }
}
