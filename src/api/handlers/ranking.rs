use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{internal_error, AppState, RankingParams};
use crate::api::models::{RankingItem, RankingResponse, YearsResponse};
use crate::ranking::filter_summary;
use crate::services::RankingService;

pub async fn get_ranking(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RankingParams>,
) -> impl IntoResponse {
    let filters = match params.into_filters() {
        Ok(filters) => filters,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let entries = match RankingService::new(state.store.as_ref()).ranking(&filters) {
        Ok(entries) => entries,
        Err(e) => return internal_error(e),
    };

    Json(RankingResponse {
        total: entries.len(),
        items: entries.into_iter().map(RankingItem::from).collect(),
        active_filters: filter_summary(&filters),
    })
    .into_response()
}

pub async fn get_ranking_years(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match RankingService::new(state.store.as_ref()).years() {
        Ok(years) => Json(YearsResponse { years }).into_response(),
        Err(e) => internal_error(e),
    }
}
