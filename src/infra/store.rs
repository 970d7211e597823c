use anyhow::Result;
use uuid::Uuid;

use crate::domain::notification::{Notification, NotificationFields, NotificationPatch};

/// Persistence for notification records.
///
/// Lookup misses are `Ok(None)` / `Ok(false)`; `Err` is reserved for the
/// backing store being unavailable.
#[axum::async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert(&self, record: Notification) -> Result<Notification>;

    async fn list_all(&self) -> Result<Vec<Notification>>;

    async fn get(&self, id: Uuid) -> Result<Option<Notification>>;

    /// Overwrites every data field, keeping `id`.
    async fn replace(&self, id: Uuid, fields: NotificationFields) -> Result<Option<Notification>>;

    async fn patch(&self, id: Uuid, patch: NotificationPatch) -> Result<Option<Notification>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn ping(&self) -> Result<()>;
}
