use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::{Athlete, Tournament, TournamentLevel, TournamentResult};
use crate::storage::Store;

/// Whole-database JSON document used for seeding and backups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub levels: Vec<TournamentLevel>,
    #[serde(default)]
    pub athletes: Vec<Athlete>,
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub results: Vec<TournamentResult>,
}

impl Snapshot {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot = serde_json::from_str(&json).context("Failed to deserialize snapshot")?;

        info!("Loaded snapshot from {}", path.display());
        Ok(snapshot)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize snapshot")?;
        fs::write(path, json).with_context(|| format!("Failed to write snapshot {}", path.display()))?;

        info!("Saved snapshot to {}", path.display());
        Ok(())
    }

    pub fn capture(store: &dyn Store) -> Result<Self> {
        Ok(Self {
            levels: store.list_levels()?,
            athletes: store.list_athletes()?,
            tournaments: store.list_tournaments()?,
            results: store.list_results()?,
        })
    }
}

pub struct SeedService<'a> {
    store: &'a dyn Store,
}

impl<'a> SeedService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Inserts levels, athletes, tournaments and results in dependency order.
    pub fn load(&self, snapshot: &Snapshot) -> Result<()> {
        info!("=== Seeding store ===");

        for level in &snapshot.levels {
            self.store.insert_level(level)?;
        }
        info!("  → {} tournament levels", snapshot.levels.len());

        for athlete in &snapshot.athletes {
            self.store.insert_athlete(athlete)?;
        }
        info!("  → {} athletes", snapshot.athletes.len());

        for tournament in &snapshot.tournaments {
            self.store.insert_tournament(tournament)?;
        }
        info!("  → {} tournaments", snapshot.tournaments.len());

        for result in &snapshot.results {
            self.store
                .insert_result(result)
                .with_context(|| format!("Failed to seed result {}", result.id))?;
        }
        info!("  → {} results", snapshot.results.len());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Placement;
    use crate::storage::test_support::{athlete, level, result, tournament};
    use crate::storage::MemoryStore;

    fn snapshot() -> Snapshot {
        Snapshot {
            levels: vec![level()],
            athletes: vec![athlete("a1", "Anna", "Muster")],
            tournaments: vec![tournament("t1")],
            results: vec![result("r1", "t1", "a1", Placement::Second, 7)],
        }
    }

    #[test]
    fn test_seed_then_capture() {
        let store = MemoryStore::new();
        SeedService::new(&store).load(&snapshot()).unwrap();

        assert_eq!(Snapshot::capture(&store).unwrap(), snapshot());
    }

    #[test]
    fn test_saved_snapshot_seeds_a_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let source = MemoryStore::new();
        SeedService::new(&source).load(&snapshot()).unwrap();

        Snapshot::capture(&source).unwrap().save(&path).unwrap();
        let target = MemoryStore::new();
        SeedService::new(&target).load(&Snapshot::load(&path).unwrap()).unwrap();

        assert_eq!(Snapshot::capture(&target).unwrap(), snapshot());
        assert!(Snapshot::load(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_snapshot_json_uses_domain_names() {
        let json = r#"{
            "levels": [{"id": "BEM", "name": "Bezirk", "points_place_1": 6, "points_place_2": 4,
                        "points_place_3": 3, "points_place_5": 2, "points_place_7": 1}],
            "athletes": [{"id": "a1", "first_name": "Anna", "last_name": "Muster",
                          "birth_year": 2010, "gender": "weiblich"}]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.levels[0].schedule.points_place_1, 6);
        assert_eq!(snapshot.athletes[0].club, None);
        assert!(snapshot.results.is_empty());
    }

    #[test]
    fn test_duplicate_result_aborts_seed() {
        let mut snapshot = snapshot();
        snapshot.results.push(result("r2", "t1", "a1", Placement::First, 10));

        let store = MemoryStore::new();
        assert!(SeedService::new(&store).load(&snapshot).is_err());
    }
}
