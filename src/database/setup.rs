use anyhow::{Context, Result};
use rusqlite::Connection;

use super::data_version;

const DROP_SQL: &str = "
    DROP TABLE IF EXISTS ratings;
    DROP TABLE IF EXISTS movies;
    DROP TABLE IF EXISTS users;
";

/// Creates missing tables and triggers; existing data is left untouched.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(include_str!("schema.sql"))
        .context("Failed to apply database schema")?;

    log::debug!("Database schema ensured");
    Ok(())
}

/// Drops every entity table and recreates the schema.
///
/// `data_version` survives the reset and is bumped, so a model fitted on the
/// old rows never matches the new ones.
pub fn reset_database(conn: &Connection) -> Result<()> {
    conn.execute_batch(DROP_SQL)
        .context("Failed to drop tables")?;
    ensure_schema(conn)?;
    data_version::bump(conn)?;

    log::info!("Database schema reset successfully");
    Ok(())
}
