use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{internal_error, AppState};
use crate::services::RankingService;

pub async fn get_athlete_stats(
    State(state): State<Arc<AppState>>,
    Path(athlete_id): Path<String>,
) -> impl IntoResponse {
    match RankingService::new(state.store.as_ref()).athlete_stats(&athlete_id) {
        Ok(Some(stats)) => Json(stats).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("No results for athlete {}", athlete_id)).into_response(),
        Err(e) => internal_error(e),
    }
}
