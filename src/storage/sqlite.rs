use anyhow::{bail, Result};
use log::info;

use super::{DuplicateResult, Store};
use crate::database::{self, athletes, levels, results, tournaments, DbConn, DbPool};
use crate::domain::{Athlete, Placement, Tournament, TournamentLevel, TournamentResult};

/// Store over the SQLite schema in `database/schema.sql`.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Opens (or creates) the database file and makes sure all tables exist.
    pub fn open(database_path: &str) -> Result<Self> {
        let store = Self::from_pool(database::create_pool(database_path)?)?;
        info!("Opened SQLite store at {}", database_path);
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_pool(database::create_memory_pool()?)
    }

    pub fn from_pool(pool: DbPool) -> Result<Self> {
        let store = Self { pool };
        database::ensure_schema(&mut store.conn()?)?;
        Ok(store)
    }

    /// Drops and recreates every table.
    pub fn reset(&self) -> Result<()> {
        database::reset_database(&mut self.conn()?)
    }

    fn conn(&self) -> Result<DbConn> {
        database::get_connection(&self.pool)
    }
}

impl Store for SqliteStore {
    fn list_athletes(&self) -> Result<Vec<Athlete>> {
        athletes::list_all(&mut self.conn()?)
    }

    fn list_levels(&self) -> Result<Vec<TournamentLevel>> {
        levels::list_all(&mut self.conn()?)
    }

    fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        tournaments::list_all(&mut self.conn()?)
    }

    fn find_tournament(&self, tournament_id: &str) -> Result<Option<Tournament>> {
        tournaments::find_by_id(&mut self.conn()?, tournament_id)
    }

    fn find_athlete(&self, athlete_id: &str) -> Result<Option<Athlete>> {
        athletes::find_by_id(&mut self.conn()?, athlete_id)
    }

    fn list_results(&self) -> Result<Vec<TournamentResult>> {
        results::list_all(&mut self.conn()?)
    }

    fn results_for_tournament(&self, tournament_id: &str) -> Result<Vec<TournamentResult>> {
        results::list_for_tournament(&mut self.conn()?, tournament_id)
    }

    fn find_result(&self, tournament_id: &str, athlete_id: &str) -> Result<Option<TournamentResult>> {
        results::find_for_pair(&mut self.conn()?, tournament_id, athlete_id)
    }

    fn insert_result(&self, result: &TournamentResult) -> Result<()> {
        results::insert_result(&mut self.conn()?, result).map_err(|e| {
            if is_unique_violation(&e) {
                DuplicateResult {
                    tournament_id: result.tournament_id.clone(),
                    athlete_id: result.athlete_id.clone(),
                }
                .into()
            } else {
                e
            }
        })
    }

    fn replace_result(&self, result_id: &str, placement: Placement, points: i32, imported_at: &str) -> Result<()> {
        if !results::replace_result(&mut self.conn()?, result_id, placement, points, imported_at)? {
            bail!("Result {} does not exist", result_id);
        }
        Ok(())
    }

    fn delete_result(&self, result_id: &str) -> Result<bool> {
        results::delete_result(&mut self.conn()?, result_id)
    }

    fn insert_athlete(&self, athlete: &Athlete) -> Result<()> {
        athletes::insert_athlete(&mut self.conn()?, athlete)
    }

    fn insert_tournament(&self, tournament: &Tournament) -> Result<()> {
        tournaments::insert_tournament(&mut self.conn()?, tournament)
    }

    fn insert_level(&self, level: &TournamentLevel) -> Result<()> {
        levels::insert_level(&mut self.conn()?, level)
    }
}

/// Only the (tournament, athlete) UNIQUE constraint; primary key and foreign
/// key violations stay ordinary errors.
fn is_unique_violation(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _)) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
