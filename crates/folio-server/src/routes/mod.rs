//! HTTP route handlers.

pub mod articles;
pub mod dashboard;

use crate::state::AppState;
use axum::{
    http::StatusCode,
    routing::get,
    Json, Router,
};
use folio_core::FolioError;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Routes mounted under `/api`.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/articles",
            get(articles::list).post(articles::create),
        )
        .route(
            "/articles/{id}",
            get(articles::get)
                .put(articles::save)
                .delete(articles::delete),
        )
        .route("/articles/{id}/headings", get(articles::headings))
        .route("/articles/by-slug/{slug}", get(articles::get_by_slug))
        .route("/dashboard/contributions", get(dashboard::contributions))
        .route("/health", get(health))
}

/// Map a store error onto an HTTP status and message.
pub(crate) fn error_response(err: FolioError) -> (StatusCode, String) {
    let status = match &err {
        FolioError::ArticleNotFound(_) => StatusCode::NOT_FOUND,
        FolioError::SlugConflict(_) => StatusCode::CONFLICT,
        FolioError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(target: "folio::api", "Request failed: {}", err);
    }
    (status, err.to_string())
}
