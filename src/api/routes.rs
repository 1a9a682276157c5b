use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    athletes::get_athlete_stats,
    imports::{apply_import, preview_import},
    ranking::{get_ranking, get_ranking_years},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ranking", get(get_ranking))
        .route("/api/ranking/years", get(get_ranking_years))
        .route("/api/tournaments/:id/import/preview", post(preview_import))
        .route("/api/tournaments/:id/import", post(apply_import))
        .route("/api/athletes/:id/stats", get(get_athlete_stats))
        .with_state(state)
}
