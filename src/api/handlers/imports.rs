use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use super::{internal_error, AppState};
use crate::api::models::{ImportRequest, PreviewRequest};
use crate::services::ImportService;

pub async fn preview_import(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<String>,
    Json(request): Json<PreviewRequest>,
) -> impl IntoResponse {
    if let Some(response) = missing_tournament(&state, &tournament_id) {
        return response;
    }

    let service = ImportService::new(state.store.as_ref(), &state.config);
    match service.preview(&tournament_id, &request.rows) {
        Ok(preview) => Json(preview).into_response(),
        Err(e) => internal_error(e),
    }
}

pub async fn apply_import(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<String>,
    Json(request): Json<ImportRequest>,
) -> impl IntoResponse {
    if let Some(response) = missing_tournament(&state, &tournament_id) {
        return response;
    }

    let service = ImportService::new(state.store.as_ref(), &state.config);
    let mut preview = match service.preview(&tournament_id, &request.rows) {
        Ok(preview) => preview,
        Err(e) => return internal_error(e),
    };
    if let Err(e) = service.apply_overrides(&mut preview, &request.decisions) {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    match service.apply(&preview) {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => internal_error(e),
    }
}

fn missing_tournament(state: &AppState, tournament_id: &str) -> Option<Response> {
    match state.store.find_tournament(tournament_id) {
        Ok(Some(_)) => None,
        Ok(None) => Some((StatusCode::NOT_FOUND, format!("Tournament {} not found", tournament_id)).into_response()),
        Err(e) => Some(internal_error(e)),
    }
}
