use axum::Router;

use crate::AppState;

mod error;
mod extract;
mod handlers;
mod routes;

pub use error::AppError;
pub use extract::{AppJson, AppPath};

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health())
        .merge(routes::notifications())
        .with_state(state)
}
