use anyhow::{Context, Result};
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::notification::{Notification, NotificationFields, NotificationPatch};
use crate::infra::db::Db;
use crate::infra::store::NotificationStore;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS notifications ( \
     id UUID PRIMARY KEY, \
     user_id BIGINT NOT NULL CHECK (user_id >= 1), \
     notification TEXT NOT NULL CHECK (char_length(notification) BETWEEN 1 AND 500), \
     send_at TIMESTAMP NOT NULL \
 )";

const CREATE_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS ix_notifications_user_id ON notifications (user_id)";

#[derive(Clone)]
pub struct PgNotificationStore {
    db: Db,
}

impl PgNotificationStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Creates the `notifications` table and its index when absent.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE)
            .execute(self.db.pool())
            .await
            .context("create notifications table")?;
        sqlx::query(CREATE_USER_INDEX)
            .execute(self.db.pool())
            .await
            .context("create notifications user_id index")?;
        Ok(())
    }
}

fn notification_from_row(row: PgRow) -> Notification {
    Notification {
        id: row.get("id"),
        user_id: row.get("user_id"),
        notification: row.get("notification"),
        send_at: row.get("send_at"),
    }
}

#[axum::async_trait]
impl NotificationStore for PgNotificationStore {
    async fn insert(&self, record: Notification) -> Result<Notification> {
        let row = sqlx::query(
            "INSERT INTO notifications (id, user_id, notification, send_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_id, notification, send_at",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.notification)
        .bind(record.send_at)
        .fetch_one(self.db.pool())
        .await?;

        Ok(notification_from_row(row))
    }

    async fn list_all(&self) -> Result<Vec<Notification>> {
        let rows = sqlx::query("SELECT id, user_id, notification, send_at FROM notifications")
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.into_iter().map(notification_from_row).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Notification>> {
        let row = sqlx::query(
            "SELECT id, user_id, notification, send_at \
             FROM notifications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(notification_from_row))
    }

    async fn replace(&self, id: Uuid, fields: NotificationFields) -> Result<Option<Notification>> {
        let row = sqlx::query(
            "UPDATE notifications \
             SET user_id = $2, notification = $3, send_at = $4 \
             WHERE id = $1 \
             RETURNING id, user_id, notification, send_at",
        )
        .bind(id)
        .bind(fields.user_id)
        .bind(fields.notification)
        .bind(fields.send_at)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(notification_from_row))
    }

    async fn patch(&self, id: Uuid, patch: NotificationPatch) -> Result<Option<Notification>> {
        let row = sqlx::query(
            "UPDATE notifications \
             SET notification = COALESCE($2, notification), \
                 send_at = COALESCE($3, send_at) \
             WHERE id = $1 \
             RETURNING id, user_id, notification, send_at",
        )
        .bind(id)
        .bind(patch.notification)
        .bind(patch.send_at)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(notification_from_row))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        self.db.ping().await
    }
}
