use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::conversion_error;
use crate::domain::{Placement, TournamentResult};

const COLUMNS: &str = "id, tournament_id, athlete_id, placement, points, is_manual, imported_at";

/// Fails on a second result for the same (tournament, athlete) pair.
pub fn insert_result(conn: &mut DbConn, result: &TournamentResult) -> Result<()> {
    let sql = format!("INSERT INTO tournament_results ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)", COLUMNS);

    conn.execute(
        &sql,
        params![
            result.id,
            result.tournament_id,
            result.athlete_id,
            result.placement.value(),
            result.points,
            result.is_manual,
            result.imported_at,
        ],
    )
    .with_context(|| {
        format!(
            "Failed to insert result for athlete {} at tournament {}",
            result.athlete_id, result.tournament_id
        )
    })?;
    Ok(())
}

/// Updates placement and points in place; returns false when the id is unknown.
pub fn replace_result(
    conn: &mut DbConn,
    result_id: &str,
    placement: Placement,
    points: i32,
    imported_at: &str,
) -> Result<bool> {
    let sql = "UPDATE tournament_results SET placement = ?1, points = ?2, imported_at = ?3 WHERE id = ?4";

    let changed = conn
        .execute(sql, params![placement.value(), points, imported_at, result_id])
        .with_context(|| format!("Failed to replace result {}", result_id))?;
    Ok(changed > 0)
}

pub fn delete_result(conn: &mut DbConn, result_id: &str) -> Result<bool> {
    let changed = conn
        .execute("DELETE FROM tournament_results WHERE id = ?1", params![result_id])
        .with_context(|| format!("Failed to delete result {}", result_id))?;
    Ok(changed > 0)
}

pub fn find_for_pair(conn: &mut DbConn, tournament_id: &str, athlete_id: &str) -> Result<Option<TournamentResult>> {
    let sql = format!(
        "SELECT {} FROM tournament_results WHERE tournament_id = ?1 AND athlete_id = ?2",
        COLUMNS
    );

    conn.query_row(&sql, params![tournament_id, athlete_id], parse_result_row)
        .optional()
        .context("Failed to query result by tournament and athlete")
}

pub fn list_for_tournament(conn: &mut DbConn, tournament_id: &str) -> Result<Vec<TournamentResult>> {
    let sql = format!(
        "SELECT {} FROM tournament_results WHERE tournament_id = ?1 ORDER BY placement, rowid",
        COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<TournamentResult>> {
    let sql = format!("SELECT {} FROM tournament_results ORDER BY rowid", COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_result_row(row: &rusqlite::Row) -> rusqlite::Result<TournamentResult> {
    let placement: i64 = row.get(3)?;
    Ok(TournamentResult {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        athlete_id: row.get(2)?,
        placement: Placement::try_from(placement).map_err(|e| conversion_error(3, e))?,
        points: row.get(4)?,
        is_manual: row.get(5)?,
        imported_at: row.get(6)?,
    })
}
