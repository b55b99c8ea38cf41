use chrono::NaiveDateTime;

use crate::engine::types::{ItemId, Rating, UserId};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Movie {
    pub id: ItemId,
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct StoredRating {
    pub id: i64,
    pub user_id: UserId,
    pub movie_id: ItemId,
    pub rating: f64,
    pub created_at: Option<NaiveDateTime>,
}

impl StoredRating {
    pub fn to_rating(&self) -> Rating {
        Rating::new(self.user_id, self.movie_id, self.rating)
    }
}

/// Users, movies and ratings read inside one transaction.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// `data_version` the rows were read at.
    pub version: i64,
    pub users: Vec<User>,
    pub movies: Vec<Movie>,
    pub ratings: Vec<StoredRating>,
}

impl Snapshot {
    pub fn user_ids(&self) -> Vec<UserId> {
        self.users.iter().map(|u| u.id).collect()
    }

    pub fn movie_ids(&self) -> Vec<ItemId> {
        self.movies.iter().map(|m| m.id).collect()
    }

    pub fn engine_ratings(&self) -> Vec<Rating> {
        self.ratings.iter().map(StoredRating::to_rating).collect()
    }
}
