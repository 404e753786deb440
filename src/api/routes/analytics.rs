use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::agents::AdviceInput;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    compute_combinations, compute_hero_stats, compute_summary, filter_combinations, search_heroes,
};
use crate::models::{Combination, HeroStats, Match, Side, TeamSummary};
use crate::storage::MatchStore;

async fn snapshot(state: &AppState) -> Result<Vec<Match>, ApiError> {
    Ok(state.store.read().await.list()?)
}

// ── Hero Statistics ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HeroParams {
    /// "own" (default) or "opponent"
    pub side: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroesResponse {
    pub side: String,
    pub total_matches: usize,
    pub heroes: Vec<HeroStats>,
}

pub async fn heroes(
    State(state): State<AppState>,
    Query(params): Query<HeroParams>,
) -> Result<Json<HeroesResponse>, ApiError> {
    let side = match params.side.as_deref() {
        None | Some("") => Side::Own,
        Some(raw) => raw.parse::<Side>().map_err(ApiError::BadRequest)?,
    };

    let matches = snapshot(&state).await?;
    let mut heroes = compute_hero_stats(&matches, side);
    if let Some(query) = params.search.as_deref() {
        heroes = search_heroes(&heroes, query);
    }

    Ok(Json(HeroesResponse {
        side: side.to_string(),
        total_matches: matches.len(),
        heroes,
    }))
}

// ── Head to Head ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HeadToHeadParams {
    /// Comma-separated own-side heroes
    #[serde(default)]
    pub own: String,
    /// Comma-separated opponent heroes
    #[serde(default)]
    pub opp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadResponse {
    /// Combinations before filtering
    pub total_combinations: usize,
    pub combinations: Vec<Combination>,
}

pub async fn head_to_head(
    State(state): State<AppState>,
    Query(params): Query<HeadToHeadParams>,
) -> Result<Json<HeadToHeadResponse>, ApiError> {
    let matches = snapshot(&state).await?;
    let all = compute_combinations(&matches);

    Ok(Json(HeadToHeadResponse {
        total_combinations: all.len(),
        combinations: filter_combinations(&all, &params.own, &params.opp),
    }))
}

// ── Summary ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub team_name: String,
    /// Absent when no matches are recorded
    pub summary: Option<TeamSummary>,
}

pub async fn summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, ApiError> {
    let matches = snapshot(&state).await?;
    Ok(Json(SummaryResponse {
        team_name: state.config.team_name.clone(),
        summary: compute_summary(&matches),
    }))
}

// ── Advice Sample ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceSampleResponse {
    pub sample_size: usize,
    pub lines: Vec<String>,
    pub matches: Vec<Match>,
}

/// The bounded match sample a draft advisor would receive.
pub async fn advice_sample(
    State(state): State<AppState>,
) -> Result<Json<AdviceSampleResponse>, ApiError> {
    let matches = snapshot(&state).await?;
    let input = AdviceInput::from_recent(&matches, state.config.advice.sample_size);

    Ok(Json(AdviceSampleResponse {
        sample_size: state.config.advice.sample_size,
        lines: input.summary_lines(),
        matches: input.sample,
    }))
}
