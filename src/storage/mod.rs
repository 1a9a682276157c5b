pub mod memory;
pub mod sqlite;

use anyhow::Result;

use crate::domain::{
    Athlete, AthleteId, Placement, Tournament, TournamentId, TournamentLevel, TournamentResult,
};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Raised by [`Store::insert_result`] when the athlete already has a result at the tournament.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("athlete {athlete_id} already has a result at tournament {tournament_id}")]
pub struct DuplicateResult {
    pub tournament_id: TournamentId,
    pub athlete_id: AthleteId,
}

/// Persistence boundary. Matching and ranking never see it; services load
/// plain slices from a store and hand them over.
pub trait Store: Send + Sync {
    fn list_athletes(&self) -> Result<Vec<Athlete>>;
    fn list_levels(&self) -> Result<Vec<TournamentLevel>>;
    fn list_tournaments(&self) -> Result<Vec<Tournament>>;
    fn find_tournament(&self, tournament_id: &str) -> Result<Option<Tournament>>;
    fn find_athlete(&self, athlete_id: &str) -> Result<Option<Athlete>>;
    fn list_results(&self) -> Result<Vec<TournamentResult>>;
    fn results_for_tournament(&self, tournament_id: &str) -> Result<Vec<TournamentResult>>;
    fn find_result(&self, tournament_id: &str, athlete_id: &str) -> Result<Option<TournamentResult>>;

    /// Fails with [`DuplicateResult`] if the (tournament, athlete) pair is taken.
    fn insert_result(&self, result: &TournamentResult) -> Result<()>;
    fn replace_result(&self, result_id: &str, placement: Placement, points: i32, imported_at: &str) -> Result<()>;
    fn delete_result(&self, result_id: &str) -> Result<bool>;

    fn insert_athlete(&self, athlete: &Athlete) -> Result<()>;
    fn insert_tournament(&self, tournament: &Tournament) -> Result<()>;
    fn insert_level(&self, level: &TournamentLevel) -> Result<()>;
}

pub fn is_duplicate(error: &anyhow::Error) -> bool {
    error.downcast_ref::<DuplicateResult>().is_some()
}
