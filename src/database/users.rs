use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::User;
use crate::engine::types::UserId;

pub fn insert_user(conn: &Connection, name: &str) -> Result<User> {
    let sql = "INSERT INTO users (name) VALUES (?1) RETURNING id, name, created_at";

    conn.query_row(sql, params![name], parse_user_row)
        .context("Failed to insert user")
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub fn exists(conn: &Connection, id: UserId) -> Result<bool> {
    let sql = "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)";

    conn.query_row(sql, params![id], |row| row.get(0))
        .context("Failed to check user existence")
}

pub fn list_all(conn: &Connection) -> Result<Vec<User>> {
    let sql = "SELECT id, name, created_at FROM users ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_user_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
