use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::search_matches;
use crate::entry::NewMatch;
use crate::models::{Match, MatchId};
use crate::storage::MatchStore;

#[derive(Debug, Deserialize)]
pub struct ListMatchesParams {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchListResponse {
    pub total: usize,
    pub matches: Vec<Match>,
}

/// Matches newest first, optionally narrowed by `?search=`.
pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<ListMatchesParams>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let mut matches = state.store.read().await.list()?;
    if let Some(query) = params.search.as_deref() {
        matches = search_matches(&matches, query);
    }
    Ok(Json(MatchListResponse {
        total: matches.len(),
        matches,
    }))
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let id = MatchId::from(id);
    state
        .store
        .read()
        .await
        .get(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("match {}", id)))
}

pub async fn create_match(
    State(state): State<AppState>,
    Json(entry): Json<NewMatch>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let today = chrono::Local::now().date_naive();
    let record = entry.into_match(today)?;

    state.store.write().await.append(record.clone())?;
    info!("Match {} recorded via API", record.id);

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = MatchId::from(id);
    if state.store.write().await.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("match {}", id)))
    }
}
