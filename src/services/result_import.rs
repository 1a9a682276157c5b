use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;

use super::ids::{next_id, timestamp};
use crate::config::settings::AppConfig;
use crate::domain::{Placement, TournamentResult};
use crate::import::{build_plan, CellParser, ImportDecision, ImportPreview, PlannedWrite, RawRow, ResultRowInterpreter};
use crate::storage::{is_duplicate, Store};

/// Decision overrides keyed by 1-based row number, as shown in messages.
pub type DecisionOverrides = HashMap<usize, ImportDecision>;

/// Reads a JSON array of row objects. Numbers are kept as their text, nulls dropped.
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read row file {}", path.display()))?;
    let rows: Vec<HashMap<String, Value>> =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse row file {}", path.display()))?;

    Ok(rows.into_iter().map(into_raw_row).collect())
}

pub fn load_overrides<P: AsRef<Path>>(path: P) -> Result<DecisionOverrides> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read decisions {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse decisions {}", path.display()))
}

fn into_raw_row(row: HashMap<String, Value>) -> RawRow {
    row.into_iter()
        .filter_map(|(column, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((column, text)),
            other => Some((column, other.to_string())),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// New results written, including those for freshly created athletes.
    pub imported: usize,
    pub overwritten: usize,
    /// Athletes added to the roster.
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
    /// Inserts refused because the athlete already had a result.
    pub duplicates: usize,
}

pub struct ImportService<'a> {
    store: &'a dyn Store,
    config: &'a AppConfig,
}

impl<'a> ImportService<'a> {
    pub fn new(store: &'a dyn Store, config: &'a AppConfig) -> Self {
        Self { store, config }
    }

    /// Interprets the rows against the current roster without writing anything.
    pub fn preview(&self, tournament_id: &str, rows: &[RawRow]) -> Result<ImportPreview> {
        let tournament = self
            .store
            .find_tournament(tournament_id)?
            .with_context(|| format!("Tournament {} does not exist", tournament_id))?;
        let roster = self.store.list_athletes()?;
        let existing = self.store.results_for_tournament(tournament_id)?;

        info!(
            "Previewing {} rows for '{}' against {} athletes",
            rows.len(),
            tournament.name,
            roster.len()
        );

        let mut interpreter = ResultRowInterpreter::new(&roster, &tournament, &existing, self.config)?;
        Ok(interpreter.interpret_batch(rows))
    }

    /// Applies caller decisions to a preview. Every override is checked
    /// against what the row permits; unknown row numbers are errors.
    pub fn apply_overrides(&self, preview: &mut ImportPreview, overrides: &DecisionOverrides) -> Result<()> {
        let mut row_numbers: Vec<&usize> = overrides.keys().collect();
        row_numbers.sort();

        for row_number in row_numbers {
            let decision = overrides[row_number];
            let row = row_number
                .checked_sub(1)
                .and_then(|index| preview.row_mut(index))
                .with_context(|| format!("Row {} is not part of the preview", row_number))?;
            row.set_decision(decision)?;
        }
        Ok(())
    }

    /// Executes the preview's decisions. A failing row is recorded in the
    /// summary and does not stop the remaining rows.
    pub fn apply(&self, preview: &ImportPreview) -> Result<ImportSummary> {
        let parser = CellParser::new()?;
        let plan = build_plan(preview, &parser);
        let imported_at = timestamp();

        let mut summary = ImportSummary {
            skipped: plan.skipped,
            errors: plan.errors.clone(),
            ..Default::default()
        };
        for message in &plan.errors {
            warn!("{}", message);
        }

        for write in &plan.writes {
            if let Err(e) = self.execute(&plan.tournament_id, write, &imported_at, &mut summary) {
                if is_duplicate(&e) {
                    warn!("Row {}: {}", write_row(write) + 1, e);
                    summary.duplicates += 1;
                } else {
                    error!("Row {}: {:#}", write_row(write) + 1, e);
                    summary.errors.push(format!("Row {}: {:#}", write_row(write) + 1, e));
                }
            }
        }

        info!(
            "Import into {} finished: {} imported, {} overwritten, {} athletes created, {} skipped, {} duplicates, {} errors",
            plan.tournament_id,
            summary.imported,
            summary.overwritten,
            summary.created,
            summary.skipped,
            summary.duplicates,
            summary.errors.len()
        );
        Ok(summary)
    }

    fn execute(
        &self,
        tournament_id: &str,
        write: &PlannedWrite,
        imported_at: &str,
        summary: &mut ImportSummary,
    ) -> Result<()> {
        match write {
            PlannedWrite::Insert { athlete_id, placement, points, .. } => {
                self.insert(tournament_id, athlete_id, *placement, *points, imported_at)?;
                summary.imported += 1;
            }
            PlannedWrite::Replace { result_id, placement, points, .. } => {
                self.store.replace_result(result_id, *placement, *points, imported_at)?;
                summary.overwritten += 1;
            }
            PlannedWrite::CreateAthlete { draft, placement, points, .. } => {
                let athlete = draft.clone().into_athlete(next_id("ath"));
                self.store.insert_athlete(&athlete)?;
                summary.created += 1;
                info!("Created athlete {} ({})", athlete.display_name(), athlete.id);

                self.insert(tournament_id, &athlete.id, *placement, *points, imported_at)?;
                summary.imported += 1;
            }
        }
        Ok(())
    }

    fn insert(&self, tournament_id: &str, athlete_id: &str, placement: Placement, points: i32, imported_at: &str) -> Result<()> {
        self.store.insert_result(&TournamentResult {
            id: next_id("res"),
            tournament_id: tournament_id.to_string(),
            athlete_id: athlete_id.to_string(),
            placement,
            points,
            is_manual: false,
            imported_at: Some(imported_at.to_string()),
        })
    }
}

fn write_row(write: &PlannedWrite) -> usize {
    match write {
        PlannedWrite::Insert { row_index, .. }
        | PlannedWrite::Replace { row_index, .. }
        | PlannedWrite::CreateAthlete { row_index, .. } => *row_index,
    }
}
