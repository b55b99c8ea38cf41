use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Movie;
use crate::engine::types::ItemId;

pub fn insert_movie(conn: &Connection, title: &str, genre: &str, year: i32) -> Result<Movie> {
    let sql = "INSERT INTO movies (title, genre, year) VALUES (?1, ?2, ?3) RETURNING id, title, genre, year, created_at";

    conn.query_row(sql, params![title, genre, year], parse_movie_row)
        .context("Failed to insert movie")
}

fn parse_movie_row(row: &rusqlite::Row) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: row.get(0)?,
        title: row.get(1)?,
        genre: row.get(2)?,
        year: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn find_by_id(conn: &Connection, id: ItemId) -> Result<Option<Movie>> {
    let sql = "SELECT id, title, genre, year, created_at FROM movies WHERE id = ?1";

    conn.query_row(sql, params![id], parse_movie_row)
        .optional()
        .context("Failed to query movie by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<Movie>> {
    let sql = "SELECT id, title, genre, year, created_at FROM movies ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_movie_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
