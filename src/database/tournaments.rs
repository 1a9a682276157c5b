use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use crate::domain::{PointSchedule, Tournament, TournamentStatus};

const COLUMNS: &str = "id, name, level_id, date, age_group, status, points_place_1, points_place_2, points_place_3, points_place_5, points_place_7";

pub fn insert_tournament(conn: &mut DbConn, tournament: &Tournament) -> Result<()> {
    let sql = format!(
        "INSERT INTO tournaments ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        COLUMNS
    );
    let s = &tournament.schedule;

    conn.execute(
        &sql,
        params![
            tournament.id,
            tournament.name,
            tournament.level_id,
            tournament.date,
            tournament.age_group,
            tournament.status.as_str(),
            s.points_place_1,
            s.points_place_2,
            s.points_place_3,
            s.points_place_5,
            s.points_place_7,
        ],
    )
    .with_context(|| format!("Failed to insert tournament {}", tournament.id))?;
    Ok(())
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Tournament>> {
    let sql = format!("SELECT {} FROM tournaments WHERE id = ?1", COLUMNS);

    conn.query_row(&sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Tournament>> {
    let sql = format!("SELECT {} FROM tournaments ORDER BY date, rowid", COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    let status: String = row.get(5)?;
    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        level_id: row.get(2)?,
        date: row.get(3)?,
        age_group: row.get(4)?,
        status: TournamentStatus::parse(&status),
        schedule: PointSchedule {
            points_place_1: row.get(6)?,
            points_place_2: row.get(7)?,
            points_place_3: row.get(8)?,
            points_place_5: row.get(9)?,
            points_place_7: row.get(10)?,
        },
    })
}
