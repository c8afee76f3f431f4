//! Key-value persistence
//!
//! Call sites (reviews) only see [`KeyValueStore`]; the backend is picked
//! from configuration at startup.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::Result;

pub mod file;
pub mod memory;
#[cfg(feature = "sqlx")]
pub mod sqlite;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "sqlx")]
pub use sqlite::SqliteStore;

/// String-keyed store of serialized values
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// Read and deserialize a JSON value
pub async fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and write a JSON value
pub async fn set_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

/// Which backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
    #[default]
    Sqlite,
}

/// Open the configured backend inside `root_folder`
///
/// File: `<root>/store.json`. SQLite: `<root>/jtour.db`.
pub async fn open_store(backend: StoreBackend, root_folder: &Path) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match backend {
        StoreBackend::Memory => {
            info!("Using in-memory store (data is lost on restart)");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::File => {
            let path = root_folder.join("store.json");
            info!("Using file store: {}", path.display());
            Arc::new(FileStore::open(path).await?)
        }
        #[cfg(feature = "sqlx")]
        StoreBackend::Sqlite => {
            let path = root_folder.join("jtour.db");
            info!("Using SQLite store: {}", path.display());
            Arc::new(SqliteStore::open(&path).await?)
        }
        #[cfg(not(feature = "sqlx"))]
        StoreBackend::Sqlite => {
            return Err(crate::Error::Config(
                "SQLite store requested but built without the sqlx feature".to_string(),
            ))
        }
    };
    Ok(store)
}
