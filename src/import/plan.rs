use anyhow::{anyhow, bail, Result};
use serde::Serialize;

use super::decision::ImportDecision;
use super::fields::CellParser;
use super::interpreter::{ImportPreview, ParsedResultRow};
use crate::domain::{generate_import_id, Athlete, AthleteId, Gender, Placement, ResultId, TournamentId};

/// Roster entry to create for a row nobody could be matched to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteDraft {
    pub import_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_year: i32,
    pub gender: Gender,
    pub club: Option<String>,
}

impl AthleteDraft {
    pub fn from_row(row: &ParsedResultRow, parser: &CellParser) -> Result<Self> {
        let birth_year = row
            .birth_year
            .and_then(|year| parser.normalized_birth_year(&year.to_string()))
            .ok_or_else(|| anyhow!("Row {}: no usable birth year for a new athlete", row.row_index + 1))?;
        let gender = row
            .gender
            .as_deref()
            .and_then(Gender::parse)
            .ok_or_else(|| anyhow!("Row {}: no usable gender for a new athlete", row.row_index + 1))?;

        Ok(Self {
            import_id: generate_import_id(&row.last_name, &row.first_name, birth_year),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            birth_year,
            gender,
            club: row.club.clone(),
        })
    }

    pub fn into_athlete(self, id: AthleteId) -> Athlete {
        Athlete {
            id,
            import_id: self.import_id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_year: self.birth_year,
            gender: self.gender,
            club: self.club,
            district: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannedWrite {
    Insert {
        row_index: usize,
        athlete_id: AthleteId,
        placement: Placement,
        points: i32,
    },
    Replace {
        row_index: usize,
        result_id: ResultId,
        athlete_id: AthleteId,
        placement: Placement,
        points: i32,
    },
    CreateAthlete {
        row_index: usize,
        draft: AthleteDraft,
        placement: Placement,
        points: i32,
    },
}

/// Writes the caller has agreed to, derived from the per-row decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportPlan {
    pub tournament_id: TournamentId,
    pub writes: Vec<PlannedWrite>,
    pub skipped: usize,
    pub errors: Vec<String>,
}

pub fn build_plan(preview: &ImportPreview, parser: &CellParser) -> ImportPlan {
    let mut plan = ImportPlan {
        tournament_id: preview.tournament_id.clone(),
        skipped: preview.skipped.len(),
        ..Default::default()
    };

    for row in &preview.rows {
        match plan_row(row, parser) {
            Ok(Some(write)) => plan.writes.push(write),
            Ok(None) => plan.skipped += 1,
            Err(e) => plan.errors.push(e.to_string()),
        }
    }

    plan
}

fn plan_row(row: &ParsedResultRow, parser: &CellParser) -> Result<Option<PlannedWrite>> {
    let row_index = row.row_index;
    let placement = row.placement;
    let points = row.points;

    match row.decision {
        ImportDecision::Skip => Ok(None),
        ImportDecision::Import => {
            if row.conflict.is_some() {
                bail!("Row {}: result already exists, choose overwrite or skip", row_index + 1);
            }
            let athlete = matched(row)?;
            Ok(Some(PlannedWrite::Insert {
                row_index,
                athlete_id: athlete.id.clone(),
                placement,
                points,
            }))
        }
        ImportDecision::Overwrite => {
            let athlete = matched(row)?;
            let existing = row
                .conflict
                .as_ref()
                .ok_or_else(|| anyhow!("Row {}: nothing to overwrite", row_index + 1))?;
            Ok(Some(PlannedWrite::Replace {
                row_index,
                result_id: existing.result_id.clone(),
                athlete_id: athlete.id.clone(),
                placement,
                points,
            }))
        }
        ImportDecision::Create => {
            let draft = AthleteDraft::from_row(row, parser)?;
            Ok(Some(PlannedWrite::CreateAthlete {
                row_index,
                draft,
                placement,
                points,
            }))
        }
    }
}

fn matched(row: &ParsedResultRow) -> Result<&Athlete> {
    row.matched_athlete
        .as_ref()
        .ok_or_else(|| anyhow!("Row {}: no athlete assigned", row.row_index + 1))
}
