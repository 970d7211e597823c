use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::app::notifications::NotificationService;
use crate::domain::notification::{Notification, NotificationPatchPayload, NotificationPayload};
use crate::http::{AppError, AppJson, AppPath};
use crate::infra::store::NotificationStore;
use crate::AppState;

const NOT_FOUND: &str = "notification not found";

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = match state.store.ping().await {
        Ok(()) => "ok",
        Err(err) => {
            tracing::warn!(error = ?err, "store ping failed");
            "degraded"
        }
    };

    Json(HealthResponse { status })
}

pub async fn create_notification(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NotificationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.validate()?;

    let service = NotificationService::new(state.store.clone());
    let record = service.create(fields).await.map_err(|err| {
        tracing::error!(error = ?err, "failed to create notification");
        AppError::internal("failed to create notification")
    })?;

    let location = format!("/notifications/{}", record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    ))
}

pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let service = NotificationService::new(state.store.clone());
    let records = service.list().await.map_err(|err| {
        tracing::error!(error = ?err, "failed to list notifications");
        AppError::internal("failed to list notifications")
    })?;

    Ok(Json(records))
}

pub async fn get_notification(
    AppPath(id): AppPath<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Notification>, AppError> {
    let service = NotificationService::new(state.store.clone());
    let record = service.get(id).await.map_err(|err| {
        tracing::error!(error = ?err, notification_id = %id, "failed to fetch notification");
        AppError::internal("failed to fetch notification")
    })?;

    match record {
        Some(record) => Ok(Json(record)),
        None => Err(AppError::not_found(NOT_FOUND)),
    }
}

pub async fn replace_notification(
    AppPath(id): AppPath<Uuid>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<NotificationPayload>,
) -> Result<Json<Notification>, AppError> {
    let service = NotificationService::new(state.store.clone());
    ensure_exists(&service, id).await?;

    let fields = payload.validate()?;
    let record = service.replace(id, fields).await.map_err(|err| {
        tracing::error!(error = ?err, notification_id = %id, "failed to replace notification");
        AppError::internal("failed to update notification")
    })?;

    match record {
        Some(record) => Ok(Json(record)),
        None => Err(AppError::not_found(NOT_FOUND)),
    }
}

pub async fn patch_notification(
    AppPath(id): AppPath<Uuid>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<NotificationPatchPayload>,
) -> Result<Json<Notification>, AppError> {
    let service = NotificationService::new(state.store.clone());
    ensure_exists(&service, id).await?;

    let patch = payload.validate()?;
    let record = service.patch(id, patch).await.map_err(|err| {
        tracing::error!(error = ?err, notification_id = %id, "failed to patch notification");
        AppError::internal("failed to update notification")
    })?;

    match record {
        Some(record) => Ok(Json(record)),
        None => Err(AppError::not_found(NOT_FOUND)),
    }
}

pub async fn delete_notification(
    AppPath(id): AppPath<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let service = NotificationService::new(state.store.clone());
    let deleted = service.delete(id).await.map_err(|err| {
        tracing::error!(error = ?err, notification_id = %id, "failed to delete notification");
        AppError::internal("failed to delete notification")
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(NOT_FOUND))
    }
}

/// Update paths report a missing record before looking at the body.
async fn ensure_exists(service: &NotificationService, id: Uuid) -> Result<(), AppError> {
    let record = service.get(id).await.map_err(|err| {
        tracing::error!(error = ?err, notification_id = %id, "failed to fetch notification");
        AppError::internal("failed to fetch notification")
    })?;

    match record {
        Some(_) => Ok(()),
        None => Err(AppError::not_found(NOT_FOUND)),
    }
}
