use anyhow::{Context, Result};
use rusqlite::Connection;

/// Counter maintained by the schema triggers; any change to stored users,
/// movies or ratings moves it forward.
pub fn current(conn: &Connection) -> Result<i64> {
    let sql = "SELECT version FROM data_version WHERE id = 1";

    conn.query_row(sql, [], |row| row.get(0))
        .context("Failed to read data version")
}

pub fn bump(conn: &Connection) -> Result<i64> {
    let sql = "UPDATE data_version SET version = version + 1 WHERE id = 1 RETURNING version";

    conn.query_row(sql, [], |row| row.get(0))
        .context("Failed to bump data version")
}
