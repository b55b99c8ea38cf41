use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::StoredRating;
use crate::engine::types::{ItemId, UserId};

/// Inserts a rating, replacing any earlier rating of the same movie by the same user.
pub fn upsert_rating(conn: &Connection, user_id: UserId, movie_id: ItemId, rating: f64) -> Result<StoredRating> {
    let sql = "INSERT INTO ratings (user_id, movie_id, rating) VALUES (?1, ?2, ?3) \
               ON CONFLICT(user_id, movie_id) DO UPDATE SET rating = excluded.rating \
               RETURNING id, user_id, movie_id, rating, created_at";

    conn.query_row(sql, params![user_id, movie_id, rating], parse_rating_row)
        .context("Failed to upsert rating")
}

fn parse_rating_row(row: &rusqlite::Row) -> rusqlite::Result<StoredRating> {
    Ok(StoredRating {
        id: row.get(0)?,
        user_id: row.get(1)?,
        movie_id: row.get(2)?,
        rating: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn list_all(conn: &Connection) -> Result<Vec<StoredRating>> {
    let sql = "SELECT id, user_id, movie_id, rating, created_at FROM ratings ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_rating_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_user(conn: &Connection, user_id: UserId) -> Result<Vec<StoredRating>> {
    let sql = "SELECT id, user_id, movie_id, rating, created_at FROM ratings WHERE user_id = ?1 ORDER BY movie_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![user_id], parse_rating_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, movies, setup, users};

    #[test]
    fn test_upsert_replaces_previous_rating() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        setup::ensure_schema(&conn).unwrap();
        let user = users::insert_user(&conn, "Grace").unwrap();
        let movie = movies::insert_movie(&conn, "Heat", "Thriller", 1995).unwrap();

        upsert_rating(&conn, user.id, movie.id, 2.0).unwrap();
        let updated = upsert_rating(&conn, user.id, movie.id, 4.5).unwrap();

        let stored = list_by_user(&conn, user.id).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].rating, 4.5);
        assert_eq!(updated.rating, 4.5);
    }

    #[test]
    fn test_foreign_keys_are_enforced() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        setup::ensure_schema(&conn).unwrap();

        assert!(upsert_rating(&conn, 1, 1, 3.0).is_err());
    }

    #[test]
    fn test_rating_range_is_checked() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        setup::ensure_schema(&conn).unwrap();
        let user = users::insert_user(&conn, "Grace").unwrap();
        let movie = movies::insert_movie(&conn, "Heat", "Thriller", 1995).unwrap();

        assert!(upsert_rating(&conn, user.id, movie.id, 0.0).is_err());
        assert!(list_all(&conn).unwrap().is_empty());
    }
}
