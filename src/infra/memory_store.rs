use anyhow::{anyhow, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::notification::{Notification, NotificationFields, NotificationPatch};
use crate::infra::store::NotificationStore;

/// In-process store. `list_all` returns records in insertion order.
#[derive(Default)]
pub struct MemoryNotificationStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    records: HashMap<Uuid, Notification>,
    order: Vec<Uuid>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[axum::async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, record: Notification) -> Result<Notification> {
        let mut inner = self.inner.write().await;
        if inner.records.contains_key(&record.id) {
            return Err(anyhow!("duplicate notification id {}", record.id));
        }
        inner.order.push(record.id);
        inner.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<Notification>> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Notification>> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn replace(&self, id: Uuid, fields: NotificationFields) -> Result<Option<Notification>> {
        let mut inner = self.inner.write().await;
        Ok(inner.records.get_mut(&id).map(|record| {
            *record = fields.into_notification(id);
            record.clone()
        }))
    }

    async fn patch(&self, id: Uuid, patch: NotificationPatch) -> Result<Option<Notification>> {
        let mut inner = self.inner.write().await;
        Ok(inner.records.get_mut(&id).map(|record| {
            patch.apply_to(record);
            record.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        if inner.records.remove(&id).is_none() {
            return Ok(false);
        }
        inner.order.retain(|existing| *existing != id);
        Ok(true)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
