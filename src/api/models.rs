use serde::{Deserialize, Serialize};

use crate::domain::{Gender, RankingEntry};
use crate::import::RawRow;
use crate::services::DecisionOverrides;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingItem {
    pub rank: usize,
    pub athlete_id: String,
    pub name: String,
    pub club: Option<String>,
    pub birth_year: i32,
    pub gender: Gender,
    pub total_points: i32,
    pub tournament_count: usize,
}

impl From<RankingEntry> for RankingItem {
    fn from(entry: RankingEntry) -> Self {
        Self {
            rank: entry.rank,
            name: entry.athlete.display_name(),
            athlete_id: entry.athlete.id,
            club: entry.athlete.club,
            birth_year: entry.athlete.birth_year,
            gender: entry.athlete.gender,
            total_points: entry.total_points,
            tournament_count: entry.tournament_count,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub items: Vec<RankingItem>,
    pub total: usize,
    pub active_filters: Vec<String>,
}

#[derive(Serialize)]
pub struct YearsResponse {
    pub years: Vec<i32>,
}

#[derive(Deserialize)]
pub struct PreviewRequest {
    pub rows: Vec<RawRow>,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    pub rows: Vec<RawRow>,
    #[serde(default)]
    pub decisions: DecisionOverrides,
}
