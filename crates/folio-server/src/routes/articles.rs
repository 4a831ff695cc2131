//! Article routes.

use crate::routes::error_response;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use folio_core::{extract_headings, FolioError};
use folio_types::{Article, ArticleInput, Heading};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListArticlesQuery {
    #[serde(default)]
    pub published: bool,
}

#[derive(Serialize)]
pub struct ArticlesListResponse {
    pub articles: Vec<Article>,
    pub total_count: usize,
}

/// GET /api/articles - List articles, newest edit first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListArticlesQuery>,
) -> Result<Json<ArticlesListResponse>, (StatusCode, String)> {
    let articles = state
        .articles
        .list(query.published)
        .map_err(error_response)?;

    Ok(Json(ArticlesListResponse {
        total_count: articles.len(),
        articles,
    }))
}

/// POST /api/articles - Create an article.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ArticleInput>,
) -> Result<(StatusCode, Json<Article>), (StatusCode, String)> {
    let article = state.articles.create(input).map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// GET /api/articles/{id} - Get a single article.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Article>, (StatusCode, String)> {
    find(&state, id).map(Json)
}

/// GET /api/articles/by-slug/{slug} - Look up an article by its URL slug.
pub async fn get_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Article>, (StatusCode, String)> {
    state
        .articles
        .get_by_slug(&slug)
        .map_err(error_response)?
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("No article with slug '{}'", slug)))
}

/// PUT /api/articles/{id} - Save an article and record the edit.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<ArticleInput>,
) -> Result<Json<Article>, (StatusCode, String)> {
    let article = state.articles.update(id, input).map_err(error_response)?;
    Ok(Json(article))
}

/// DELETE /api/articles/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.articles.delete(id).map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/articles/{id}/headings - Table of contents for the Japanese body.
pub async fn headings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Heading>>, (StatusCode, String)> {
    let article = find(&state, id)?;
    Ok(Json(extract_headings(&article.content_ja)))
}

fn find(state: &AppState, id: Uuid) -> Result<Article, (StatusCode, String)> {
    state
        .articles
        .get(id)
        .map_err(error_response)?
        .ok_or_else(|| error_response(FolioError::ArticleNotFound(id)))
}
