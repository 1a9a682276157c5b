use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{PointSchedule, TournamentLevel};

pub fn insert_level(conn: &mut DbConn, level: &TournamentLevel) -> Result<()> {
    let sql = "INSERT INTO tournament_levels (id, name, points_place_1, points_place_2, points_place_3, points_place_5, points_place_7) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
    let s = &level.schedule;

    conn.execute(
        sql,
        params![
            level.id,
            level.name,
            s.points_place_1,
            s.points_place_2,
            s.points_place_3,
            s.points_place_5,
            s.points_place_7,
        ],
    )
    .with_context(|| format!("Failed to insert tournament level {}", level.id))?;
    Ok(())
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<TournamentLevel>> {
    let sql = "SELECT id, name, points_place_1, points_place_2, points_place_3, points_place_5, points_place_7 FROM tournament_levels ORDER BY rowid";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_level_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_level_row(row: &rusqlite::Row) -> rusqlite::Result<TournamentLevel> {
    Ok(TournamentLevel {
        id: row.get(0)?,
        name: row.get(1)?,
        schedule: PointSchedule {
            points_place_1: row.get(2)?,
            points_place_2: row.get(3)?,
            points_place_3: row.get(4)?,
            points_place_5: row.get(5)?,
            points_place_7: row.get(6)?,
        },
    })
}
