use anyhow::{Context, Result};
use rusqlite::{Connection, TransactionBehavior};

use super::models::Snapshot;
use super::{data_version, movies, ratings, users};

/// Reads all three entity sets inside a single transaction so they agree with each other.
pub fn load_snapshot(conn: &mut Connection) -> Result<Snapshot> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Deferred)
        .context("Failed to open snapshot transaction")?;

    let snapshot = Snapshot {
        version: data_version::current(&tx)?,
        users: users::list_all(&tx)?,
        movies: movies::list_all(&tx)?,
        ratings: ratings::list_all(&tx)?,
    };

    tx.commit().context("Failed to close snapshot transaction")?;

    log::debug!(
        "Loaded snapshot at version {}: {} users, {} movies, {} ratings",
        snapshot.version,
        snapshot.users.len(),
        snapshot.movies.len(),
        snapshot.ratings.len()
    );
    Ok(snapshot)
}
