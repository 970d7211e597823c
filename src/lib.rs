pub mod app;
pub mod config;
pub mod domain;
pub mod http;
pub mod infra;

use anyhow::Result;
use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::infra::{
    db::Db, memory_store::MemoryNotificationStore, pg_store::PgNotificationStore,
    store::NotificationStore,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NotificationStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryNotificationStore::new()))
    }

    /// Opens the configured store. For postgres this also creates the schema.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        match (config.store_backend, &config.database) {
            (StoreBackend::Postgres, Some(database)) => {
                let db = Db::connect(database).await?;
                let store = PgNotificationStore::new(db);
                store.ensure_schema().await?;
                tracing::info!("using postgres notification store");
                Ok(Self::new(Arc::new(store)))
            }
            (StoreBackend::Postgres, None) => {
                Err(anyhow::anyhow!("postgres backend selected without database settings"))
            }
            (StoreBackend::Memory, _) => {
                tracing::info!("using in-memory notification store");
                Ok(Self::in_memory())
            }
        }
    }
}
