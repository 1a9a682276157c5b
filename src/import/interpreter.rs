use std::fmt;

use anyhow::Result;
use log::{debug, info, warn};
use serde::Serialize;

use super::decision::{birth_year_warnings, default_decision, ImportDecision};
use super::fields::{CellParser, RawRow, RowFields};
use crate::config::settings::{AppConfig, ColumnSettings};
use crate::domain::{Athlete, MatchStatus, Placement, ResultId, Tournament, TournamentId, TournamentResult};
use crate::matching::AthleteMatcher;
use crate::scoring::points_for;

/// Why a row was dropped before matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SkipReason {
    InvalidPlacement(String),
    MissingName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidPlacement(raw) => {
                write!(f, "invalid placement '{}', valid are 1, 2, 3, 5, 7", raw)
            }
            SkipReason::MissingName => write!(f, "missing name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub row_index: usize,
    pub reason: SkipReason,
}

/// Non-blocking observations carried with a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowWarning {
    BirthYearMismatch { row_year: i32, athlete_year: i32 },
}

/// The result already stored for the matched athlete at this tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistingResult {
    pub result_id: ResultId,
    pub placement: Placement,
    pub points: i32,
}

impl From<&TournamentResult> for ExistingResult {
    fn from(result: &TournamentResult) -> Self {
        Self {
            result_id: result.id.clone(),
            placement: result.placement,
            points: result.points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedResultRow {
    pub row_index: usize,
    pub tournament_id: TournamentId,
    pub first_name: String,
    pub last_name: String,
    pub birth_year: Option<i32>,
    pub club: Option<String>,
    pub gender: Option<String>,
    pub placement: Placement,
    pub matched_athlete: Option<Athlete>,
    pub match_status: MatchStatus,
    pub confidence: u8,
    pub similar_athletes: Vec<Athlete>,
    /// Schedule points for the placement, stored only if the decision writes a result.
    pub points: i32,
    pub warnings: Vec<RowWarning>,
    pub conflict: Option<ExistingResult>,
    pub decision: ImportDecision,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportPreview {
    pub tournament_id: TournamentId,
    pub rows: Vec<ParsedResultRow>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportPreview {
    pub fn conflicts(&self) -> impl Iterator<Item = &ParsedResultRow> {
        self.rows.iter().filter(|r| r.conflict.is_some())
    }

    pub fn row_mut(&mut self, row_index: usize) -> Option<&mut ParsedResultRow> {
        self.rows.iter_mut().find(|r| r.row_index == row_index)
    }
}

/// Turns imported rows for one tournament into match candidates.
pub struct ResultRowInterpreter<'a> {
    roster: &'a [Athlete],
    tournament: &'a Tournament,
    existing: Vec<&'a TournamentResult>,
    columns: &'a ColumnSettings,
    parser: CellParser,
    matcher: AthleteMatcher,
}

impl<'a> ResultRowInterpreter<'a> {
    pub fn new(
        roster: &'a [Athlete],
        tournament: &'a Tournament,
        existing_results: &'a [TournamentResult],
        config: &'a AppConfig,
    ) -> Result<Self> {
        let existing = existing_results
            .iter()
            .filter(|r| r.tournament_id == tournament.id)
            .collect();

        Ok(Self {
            roster,
            tournament,
            existing,
            columns: &config.columns,
            parser: CellParser::new()?,
            matcher: AthleteMatcher::new(config.matching.clone()),
        })
    }

    /// Interprets every row independently; a bad row only lands in `skipped`.
    pub fn interpret_batch(&mut self, rows: &[RawRow]) -> ImportPreview {
        let mut parsed = Vec::new();
        let mut skipped = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            match self.interpret(row_index, row) {
                Ok(row) => parsed.push(row),
                Err(reason) => {
                    warn!("Skipping row {}: {}", row_index + 1, reason);
                    skipped.push(SkippedRow { row_index, reason });
                }
            }
        }

        info!(
            "Interpreted {} rows for tournament {}: {} usable, {} skipped",
            rows.len(),
            self.tournament.id,
            parsed.len(),
            skipped.len()
        );

        ImportPreview {
            tournament_id: self.tournament.id.clone(),
            rows: parsed,
            skipped,
        }
    }

    pub fn interpret(&mut self, row_index: usize, row: &RawRow) -> Result<ParsedResultRow, SkipReason> {
        let fields = RowFields::new(row, self.columns, &self.parser);

        let placement = Self::parse_placement(&fields)?;
        let (first_name, last_name) = fields.name().ok_or(SkipReason::MissingName)?;
        let birth_year = fields.birth_year();

        let outcome = self
            .matcher
            .find_best_match(&first_name, &last_name, self.roster, birth_year);
        let match_status = outcome.status(self.matcher.settings());
        let limit = self.matcher.settings().suggestion_limit;

        let warnings = match outcome.athlete {
            Some(athlete) => birth_year_warnings(birth_year, athlete),
            None => Vec::new(),
        };
        for warning in &warnings {
            debug!("Row {}: {:?}", row_index + 1, warning);
        }

        let conflict = outcome.athlete.and_then(|athlete| self.find_existing(athlete));

        let mut parsed = ParsedResultRow {
            row_index,
            tournament_id: self.tournament.id.clone(),
            first_name,
            last_name,
            birth_year,
            club: fields.club(),
            gender: fields.gender(),
            placement,
            matched_athlete: outcome.athlete.cloned(),
            match_status,
            confidence: outcome.confidence,
            similar_athletes: outcome
                .similar_athletes
                .iter()
                .take(limit)
                .map(|a| (*a).clone())
                .collect(),
            points: points_for(placement.value(), &self.tournament.schedule),
            warnings,
            conflict,
            decision: ImportDecision::Skip,
        };
        parsed.decision = default_decision(&parsed);

        Ok(parsed)
    }

    fn parse_placement(fields: &RowFields<'_>) -> Result<Placement, SkipReason> {
        let raw = fields.placement().unwrap_or_default();
        fields
            .placement_value()
            .and_then(|value| Placement::try_from(value).ok())
            .ok_or_else(|| SkipReason::InvalidPlacement(raw.to_string()))
    }

    fn find_existing(&self, athlete: &Athlete) -> Option<ExistingResult> {
        self.existing
            .iter()
            .find(|r| r.athlete_id == athlete.id)
            .map(|r| ExistingResult::from(*r))
    }
}
