use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use log::info;

use crate::domain::{RankingEntry, RankingFilters};
use crate::ranking::{athlete_stats, available_years, export_ranking_csv, rank, AthleteStats};
use crate::storage::Store;

/// Loads snapshots from a store and hands them to the pure ranking functions.
pub struct RankingService<'a> {
    store: &'a dyn Store,
}

impl<'a> RankingService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub fn ranking(&self, filters: &RankingFilters) -> Result<Vec<RankingEntry>> {
        let results = self.store.list_results()?;
        let athletes = self.store.list_athletes()?;
        let tournaments = self.store.list_tournaments()?;
        Ok(rank(&results, &athletes, &tournaments, filters))
    }

    pub fn years(&self) -> Result<Vec<i32>> {
        Ok(available_years(&self.store.list_tournaments()?))
    }

    pub fn athlete_stats(&self, athlete_id: &str) -> Result<Option<AthleteStats>> {
        let results = self.store.list_results()?;
        let tournaments = self.store.list_tournaments()?;
        Ok(athlete_stats(athlete_id, &results, &tournaments))
    }

    /// Writes the filtered ranking as CSV and returns the number of entries.
    pub fn export<P: AsRef<Path>>(&self, filters: &RankingFilters, path: P) -> Result<usize> {
        let entries = self.ranking(filters)?;
        let csv = export_ranking_csv(&entries, filters, Local::now().date_naive());
        let path = path.as_ref();

        fs::write(path, csv).with_context(|| format!("Failed to write ranking export {}", path.display()))?;

        info!("Exported {} ranking entries to {}", entries.len(), path.display());
        Ok(entries.len())
    }
}
