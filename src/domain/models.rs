use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::placement::Placement;

pub type AthleteId = String;
pub type TournamentId = String;
pub type LevelId = String;
pub type ResultId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "männlich")]
    Male,
    #[serde(rename = "weiblich")]
    Female,
    #[serde(rename = "divers")]
    Diverse,
}

impl Gender {
    /// Accepts the full German words and their one-letter short forms.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "männlich" | "m" => Some(Gender::Male),
            "weiblich" | "w" => Some(Gender::Female),
            "divers" | "d" => Some(Gender::Diverse),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "männlich",
            Gender::Female => "weiblich",
            Gender::Diverse => "divers",
        }
    }

    pub fn short(&self) -> &str {
        match self {
            Gender::Male => "m",
            Gender::Female => "w",
            Gender::Diverse => "d",
        }
    }
}

/// Roster entry. Results and camp participants only ever reference it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: AthleteId,
    #[serde(default)]
    pub import_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_year: i32,
    pub gender: Gender,
    #[serde(default)]
    pub club: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

impl Athlete {
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Key used to detect the same person across athlete imports.
pub fn generate_import_id(last_name: &str, first_name: &str, birth_year: i32) -> String {
    let normalized = format!("{}_{}_{}", last_name.trim(), first_name.trim(), birth_year).to_lowercase();
    normalized.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Points awarded per placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointSchedule {
    pub points_place_1: i32,
    pub points_place_2: i32,
    pub points_place_3: i32,
    pub points_place_5: i32,
    pub points_place_7: i32,
}

impl PointSchedule {
    pub fn points(&self, placement: Placement) -> i32 {
        match placement {
            Placement::First => self.points_place_1,
            Placement::Second => self.points_place_2,
            Placement::Third => self.points_place_3,
            Placement::Fifth => self.points_place_5,
            Placement::Seventh => self.points_place_7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentLevel {
    pub id: LevelId,
    pub name: String,
    #[serde(flatten)]
    pub schedule: PointSchedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    #[default]
    Planned,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TournamentStatus::Planned => "planned",
            TournamentStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "completed" => TournamentStatus::Completed,
            _ => TournamentStatus::Planned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub level_id: LevelId,
    pub date: NaiveDate,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub status: TournamentStatus,
    /// Copied from the level when the tournament was created.
    #[serde(flatten)]
    pub schedule: PointSchedule,
}

impl Tournament {
    /// Creates a tournament holding its own copy of the level's point schedule,
    /// so later level edits leave historical tournaments untouched.
    pub fn from_level(
        id: impl Into<TournamentId>,
        name: impl Into<String>,
        level: &TournamentLevel,
        date: NaiveDate,
        age_group: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level_id: level.id.clone(),
            date,
            age_group,
            status: TournamentStatus::Planned,
            schedule: level.schedule,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// One athlete's placement at one tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub id: ResultId,
    pub tournament_id: TournamentId,
    pub athlete_id: AthleteId,
    pub placement: Placement,
    pub points: i32,
    #[serde(default)]
    pub is_manual: bool,
    #[serde(default)]
    pub imported_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Exact,
    Similar,
    Unknown,
}

impl MatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MatchStatus::Exact => "exact",
            MatchStatus::Similar => "similar",
            MatchStatus::Unknown => "unknown",
        }
    }
}

/// Optional, AND-combined restrictions applied before ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingFilters {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub tournament_id: Option<TournamentId>,
    #[serde(default)]
    pub tournament_levels: Vec<LevelId>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birth_year_min: Option<i32>,
    #[serde(default)]
    pub birth_year_max: Option<i32>,
    #[serde(default)]
    pub age_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub athlete: Athlete,
    pub total_points: i32,
    pub tournament_count: usize,
    pub rank: usize,
}
