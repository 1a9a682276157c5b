use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::interpreter::{ParsedResultRow, RowWarning};
use crate::config::settings::MatchSettings;
use crate::domain::{Athlete, MatchStatus, TournamentResult};
use crate::matching::classify;

/// What the caller wants done with one interpreted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportDecision {
    Import,
    Skip,
    Create,
    Overwrite,
}

impl ImportDecision {
    pub fn writes_result(&self) -> bool {
        !matches!(self, ImportDecision::Skip)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImportDecision::Import => "import",
            ImportDecision::Skip => "skip",
            ImportDecision::Create => "create",
            ImportDecision::Overwrite => "overwrite",
        }
    }
}

/// Conflicting rows default to skip, confident matches to import.
pub fn default_decision(row: &ParsedResultRow) -> ImportDecision {
    if row.conflict.is_some() {
        return ImportDecision::Skip;
    }
    match row.match_status {
        MatchStatus::Exact | MatchStatus::Similar => ImportDecision::Import,
        MatchStatus::Unknown => ImportDecision::Skip,
    }
}

pub fn allowed_decisions(row: &ParsedResultRow) -> Vec<ImportDecision> {
    let matched = row.matched_athlete.is_some();
    let conflict = row.conflict.is_some();

    let mut allowed = vec![ImportDecision::Skip];
    if matched && !conflict {
        allowed.push(ImportDecision::Import);
    }
    if conflict {
        allowed.push(ImportDecision::Overwrite);
    }
    if !matched {
        allowed.push(ImportDecision::Create);
    }
    allowed
}

impl ParsedResultRow {
    /// Sets the decision, refusing anything the row's state does not permit.
    pub fn set_decision(&mut self, decision: ImportDecision) -> Result<()> {
        if !allowed_decisions(self).contains(&decision) {
            bail!(
                "Row {}: '{}' is not allowed (matched: {}, existing result: {})",
                self.row_index + 1,
                decision.as_str(),
                self.matched_athlete.is_some(),
                self.conflict.is_some()
            );
        }
        self.decision = decision;
        Ok(())
    }

    /// Points that would be stored for this row, if the decision writes a result.
    pub fn accepted_points(&self) -> Option<i32> {
        self.decision.writes_result().then_some(self.points)
    }

    /// Manual disambiguation: pins the row to an athlete picked by a person.
    pub fn assign_athlete(
        &mut self,
        athlete: &Athlete,
        existing_results: &[TournamentResult],
        settings: &MatchSettings,
    ) {
        self.matched_athlete = Some(athlete.clone());
        self.confidence = 100;
        self.match_status = classify(100, true, settings);
        self.warnings = birth_year_warnings(self.birth_year, athlete);
        self.conflict = existing_results
            .iter()
            .find(|r| r.tournament_id == self.tournament_id && r.athlete_id == athlete.id)
            .map(Into::into);
        self.decision = default_decision(self);
    }
}

pub(crate) fn birth_year_warnings(row_year: Option<i32>, athlete: &Athlete) -> Vec<RowWarning> {
    match row_year {
        Some(row_year) if row_year != athlete.birth_year => vec![RowWarning::BirthYearMismatch {
            row_year,
            athlete_year: athlete.birth_year,
        }],
        _ => Vec::new(),
    }
}
