use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::conversion_error;
use crate::domain::{Athlete, Gender};

const COLUMNS: &str = "id, import_id, first_name, last_name, birth_year, gender, club, district";

#[derive(Debug, thiserror::Error)]
#[error("unknown gender '{0}'")]
struct UnknownGender(String);

pub fn insert_athlete(conn: &mut DbConn, athlete: &Athlete) -> Result<()> {
    let sql = format!("INSERT INTO athletes ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)", COLUMNS);

    conn.execute(
        &sql,
        params![
            athlete.id,
            athlete.import_id,
            athlete.first_name,
            athlete.last_name,
            athlete.birth_year,
            athlete.gender.as_str(),
            athlete.club,
            athlete.district,
        ],
    )
    .with_context(|| format!("Failed to insert athlete {}", athlete.id))?;
    Ok(())
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Athlete>> {
    let sql = format!("SELECT {} FROM athletes WHERE id = ?1", COLUMNS);

    conn.query_row(&sql, params![id], parse_athlete_row)
        .optional()
        .context("Failed to query athlete by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Athlete>> {
    let sql = format!("SELECT {} FROM athletes ORDER BY rowid", COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_athlete_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_athlete_row(row: &rusqlite::Row) -> rusqlite::Result<Athlete> {
    let gender: String = row.get(5)?;
    Ok(Athlete {
        id: row.get(0)?,
        import_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        birth_year: row.get(4)?,
        gender: Gender::parse(&gender).ok_or_else(|| conversion_error(5, UnknownGender(gender.clone())))?,
        club: row.get(6)?,
        district: row.get(7)?,
    })
}
