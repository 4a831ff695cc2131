//! Dashboard overview routes.

use crate::routes::error_response;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use folio_core::{parse_range_days, SummaryOptions};
use folio_types::ContributionSummary;
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for the contribution heatmap.
///
/// `range` is kept as text so malformed values fall back to the default
/// instead of failing extraction.
#[derive(Deserialize)]
pub struct ContributionsQuery {
    pub range: Option<String>,
}

/// GET /api/dashboard/contributions - Zero-filled daily writing activity.
pub async fn contributions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContributionsQuery>,
) -> Result<Json<ContributionSummary>, (StatusCode, String)> {
    let options = SummaryOptions {
        range_days: parse_range_days(query.range.as_deref()),
        now: None,
    };

    let summary = state
        .contributions
        .summary(options)
        .map_err(error_response)?;

    Ok(Json(summary))
}
