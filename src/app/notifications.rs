use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::notification::{Notification, NotificationFields, NotificationPatch};
use crate::infra::store::NotificationStore;

#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, fields: NotificationFields) -> Result<Notification> {
        let id = Uuid::new_v4();
        let record = self.store.insert(fields.into_notification(id)).await?;
        tracing::info!(notification_id = %record.id, user_id = record.user_id, "notification created");
        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<Notification>> {
        self.store.list_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Notification>> {
        self.store.get(id).await
    }

    pub async fn replace(
        &self,
        id: Uuid,
        fields: NotificationFields,
    ) -> Result<Option<Notification>> {
        let record = self.store.replace(id, fields).await?;
        if record.is_some() {
            tracing::info!(notification_id = %id, "notification replaced");
        }
        Ok(record)
    }

    pub async fn patch(&self, id: Uuid, patch: NotificationPatch) -> Result<Option<Notification>> {
        if patch.is_empty() {
            return self.store.get(id).await;
        }

        let record = self.store.patch(id, patch).await?;
        if record.is_some() {
            tracing::info!(notification_id = %id, "notification patched");
        }
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            tracing::info!(notification_id = %id, "notification deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory_store::MemoryNotificationStore;
    use time::macros::datetime;

    fn service() -> NotificationService {
        NotificationService::new(Arc::new(MemoryNotificationStore::new()))
    }

    fn fields() -> NotificationFields {
        NotificationFields {
            user_id: 1,
            notification: "hi".into(),
            send_at: datetime!(2025-01-01 00:00:00),
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let service = service();
        let a = service.create(fields()).await.unwrap();
        let b = service.create(fields()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.user_id, 1);
    }

    #[tokio::test]
    async fn empty_patch_returns_current_record() {
        let service = service();
        let created = service.create(fields()).await.unwrap();

        let patched = service
            .patch(created.id, NotificationPatch::default())
            .await
            .unwrap();
        assert_eq!(patched, Some(created));

        assert_eq!(
            service
                .patch(Uuid::new_v4(), NotificationPatch::default())
                .await
                .unwrap(),
            None
        );
    }
}
