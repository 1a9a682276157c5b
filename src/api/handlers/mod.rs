use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::config::settings::AppConfig;
use crate::domain::{Gender, RankingFilters};
use crate::storage::Store;

pub mod athletes;
pub mod imports;
pub mod ranking;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: AppConfig,
}

/// Query string of `GET /api/ranking`; `levels` is comma separated.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RankingParams {
    pub year: Option<i32>,
    pub tournament_id: Option<String>,
    pub levels: Option<String>,
    pub gender: Option<String>,
    pub birth_year_min: Option<i32>,
    pub birth_year_max: Option<i32>,
    pub age_group: Option<String>,
}

impl RankingParams {
    pub fn into_filters(self) -> Result<RankingFilters, String> {
        let gender = match self.gender.as_deref() {
            None | Some("") => None,
            Some(value) => Some(Gender::parse(value).ok_or_else(|| format!("Unknown gender '{}'", value))?),
        };
        let tournament_levels = self
            .levels
            .map(|levels| {
                levels
                    .split(',')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(RankingFilters {
            year: self.year,
            tournament_id: self.tournament_id.filter(|id| !id.is_empty()),
            tournament_levels,
            gender,
            birth_year_min: self.birth_year_min,
            birth_year_max: self.birth_year_max,
            age_group: self.age_group.filter(|group| !group.is_empty()),
        })
    }
}

fn internal_error(e: anyhow::Error) -> Response {
    log::error!("Request failed: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response()
}
