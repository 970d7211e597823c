use axum::{routing::get, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn notifications() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::list_notifications).post(handlers::create_notification),
        )
        .route(
            "/notifications/:id",
            get(handlers::get_notification)
                .put(handlers::replace_notification)
                .patch(handlers::patch_notification)
                .delete(handlers::delete_notification),
        )
}
