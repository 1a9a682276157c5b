use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, bail, Result};

use super::{DuplicateResult, Store};
use crate::domain::{Athlete, Placement, Tournament, TournamentLevel, TournamentResult};

#[derive(Debug, Default)]
struct Tables {
    levels: Vec<TournamentLevel>,
    athletes: Vec<Athlete>,
    tournaments: Vec<Tournament>,
    results: Vec<TournamentResult>,
}

/// Store backed by plain vectors, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| anyhow!("Memory store lock poisoned"))
    }
}

impl Store for MemoryStore {
    fn list_athletes(&self) -> Result<Vec<Athlete>> {
        Ok(self.tables()?.athletes.clone())
    }

    fn list_levels(&self) -> Result<Vec<TournamentLevel>> {
        Ok(self.tables()?.levels.clone())
    }

    fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        let mut tournaments = self.tables()?.tournaments.clone();
        tournaments.sort_by_key(|t| t.date);
        Ok(tournaments)
    }

    fn find_tournament(&self, tournament_id: &str) -> Result<Option<Tournament>> {
        Ok(self.tables()?.tournaments.iter().find(|t| t.id == tournament_id).cloned())
    }

    fn find_athlete(&self, athlete_id: &str) -> Result<Option<Athlete>> {
        Ok(self.tables()?.athletes.iter().find(|a| a.id == athlete_id).cloned())
    }

    fn list_results(&self) -> Result<Vec<TournamentResult>> {
        Ok(self.tables()?.results.clone())
    }

    fn results_for_tournament(&self, tournament_id: &str) -> Result<Vec<TournamentResult>> {
        let mut results: Vec<TournamentResult> = self
            .tables()?
            .results
            .iter()
            .filter(|r| r.tournament_id == tournament_id)
            .cloned()
            .collect();
        results.sort_by_key(|r| r.placement);
        Ok(results)
    }

    fn find_result(&self, tournament_id: &str, athlete_id: &str) -> Result<Option<TournamentResult>> {
        Ok(self
            .tables()?
            .results
            .iter()
            .find(|r| r.tournament_id == tournament_id && r.athlete_id == athlete_id)
            .cloned())
    }

    fn insert_result(&self, result: &TournamentResult) -> Result<()> {
        let mut tables = self.tables()?;
        let taken = tables
            .results
            .iter()
            .any(|r| r.tournament_id == result.tournament_id && r.athlete_id == result.athlete_id);
        if taken {
            return Err(DuplicateResult {
                tournament_id: result.tournament_id.clone(),
                athlete_id: result.athlete_id.clone(),
            }
            .into());
        }
        tables.results.push(result.clone());
        Ok(())
    }

    fn replace_result(&self, result_id: &str, placement: Placement, points: i32, imported_at: &str) -> Result<()> {
        let mut tables = self.tables()?;
        let Some(existing) = tables.results.iter_mut().find(|r| r.id == result_id) else {
            bail!("Result {} does not exist", result_id);
        };
        existing.placement = placement;
        existing.points = points;
        existing.imported_at = Some(imported_at.to_string());
        Ok(())
    }

    fn delete_result(&self, result_id: &str) -> Result<bool> {
        let mut tables = self.tables()?;
        let before = tables.results.len();
        tables.results.retain(|r| r.id != result_id);
        Ok(tables.results.len() < before)
    }

    fn insert_athlete(&self, athlete: &Athlete) -> Result<()> {
        let mut tables = self.tables()?;
        if tables.athletes.iter().any(|a| a.id == athlete.id) {
            bail!("Athlete {} already exists", athlete.id);
        }
        tables.athletes.push(athlete.clone());
        Ok(())
    }

    fn insert_tournament(&self, tournament: &Tournament) -> Result<()> {
        let mut tables = self.tables()?;
        if tables.tournaments.iter().any(|t| t.id == tournament.id) {
            bail!("Tournament {} already exists", tournament.id);
        }
        tables.tournaments.push(tournament.clone());
        Ok(())
    }

    fn insert_level(&self, level: &TournamentLevel) -> Result<()> {
        let mut tables = self.tables()?;
        if tables.levels.iter().any(|l| l.id == level.id) {
            bail!("Tournament level {} already exists", level.id);
        }
        tables.levels.push(level.clone());
        Ok(())
    }
}
