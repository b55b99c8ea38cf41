use anyhow::{anyhow, bail, Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

use crate::config::SeedSettings;
use crate::database::{self, movies, ratings, setup, users, DbPool};
use crate::engine::types::{round_to_cents, MAX_RATING, MIN_RATING};

pub const GENRES: [&str; 10] = [
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "Documentary",
    "Animation",
    "Adventure",
];

const FIRST_NAMES: [&str; 16] = [
    "Olivia", "Liam", "Emma", "Noah", "Ava", "Mateo", "Sofia", "Lucas", "Mia", "Elias", "Zeynep",
    "Kenji", "Amara", "Ivan", "Leila", "Tomasz",
];

const LAST_NAMES: [&str; 16] = [
    "Smith", "Garcia", "Kowalski", "Yilmaz", "Nguyen", "Okafor", "Rossi", "Tanaka", "Schmidt",
    "Dubois", "Haddad", "Silva", "Novak", "Larsen", "Murphy", "Costa",
];

const TITLE_ADJECTIVES: [&str; 12] = [
    "Silent", "Broken", "Electric", "Endless", "Hidden", "Crimson", "Last", "Golden", "Frozen",
    "Wild", "Distant", "Secret",
];

const TITLE_NOUNS: [&str; 12] = [
    "Horizon", "Kingdom", "Signal", "River", "Empire", "Garden", "Machine", "Summer", "Voyage",
    "Shadow", "Harbor", "Protocol",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub movies: usize,
    pub ratings: usize,
}

/// Replaces the database contents with synthetic users, movies and ratings.
pub struct SeedingService {
    pool: DbPool,
    settings: SeedSettings,
}

impl SeedingService {
    pub fn new(pool: DbPool, settings: SeedSettings) -> Self {
        Self { pool, settings }
    }

    pub fn run(&self) -> Result<SeedSummary> {
        self.validate()?;
        info!("=== Seeding database with synthetic data ===");

        let mut rng = self.build_rng();
        let distribution = Normal::new(self.settings.rating_mean, self.settings.rating_std_dev)
            .map_err(|e| anyhow!("Invalid rating distribution: {}", e))?;
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction().context("Failed to open seeding transaction")?;

        setup::reset_database(&tx)?;

        let user_ids = (0..self.settings.users)
            .map(|_| users::insert_user(&tx, &fake_name(&mut rng)).map(|u| u.id))
            .collect::<Result<Vec<_>>>()?;
        info!("  → Inserted {} users", user_ids.len());

        let movie_ids = (0..self.settings.movies)
            .map(|_| self.insert_random_movie(&tx, &mut rng))
            .collect::<Result<Vec<_>>>()?;
        info!("  → Inserted {} movies", movie_ids.len());

        let mut rating_count = 0;
        for &user_id in &user_ids {
            for &movie_id in movie_ids.choose_multiple(&mut rng, self.settings.ratings_per_user) {
                ratings::upsert_rating(&tx, user_id, movie_id, random_rating(&mut rng, &distribution))?;
                rating_count += 1;
            }
        }
        info!("  → Inserted {} ratings", rating_count);

        tx.commit().context("Failed to commit seeded data")?;
        info!("=== Seeding Complete ===");

        Ok(SeedSummary {
            users: user_ids.len(),
            movies: movie_ids.len(),
            ratings: rating_count,
        })
    }

    fn validate(&self) -> Result<()> {
        let s = &self.settings;
        if s.ratings_per_user > s.movies {
            bail!(
                "Cannot rate {} distinct movies per user with only {} movies",
                s.ratings_per_user,
                s.movies
            );
        }
        if s.first_year > s.last_year {
            bail!("Invalid release year range {}-{}", s.first_year, s.last_year);
        }
        Ok(())
    }

    fn build_rng(&self) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn insert_random_movie(&self, conn: &rusqlite::Connection, rng: &mut StdRng) -> Result<i64> {
        let title = fake_title(rng);
        let genre = GENRES.choose(rng).copied().unwrap_or("Drama");
        let year = rng.gen_range(self.settings.first_year..=self.settings.last_year);
        movies::insert_movie(conn, &title, genre, year).map(|m| m.id)
    }
}

/// Normally distributed rating, clamped to the valid range and rounded to cents.
fn random_rating<R: Rng>(rng: &mut R, distribution: &Normal<f64>) -> f64 {
    let value = rng.sample(distribution);
    round_to_cents(value.clamp(MIN_RATING, MAX_RATING))
}

fn fake_name<R: Rng>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    format!("{} {}", first, last)
}

fn fake_title<R: Rng>(rng: &mut R) -> String {
    let adjective = TITLE_ADJECTIVES.choose(rng).copied().unwrap_or("Untitled");
    let noun = TITLE_NOUNS.choose(rng).copied().unwrap_or("Project");
    if rng.gen_bool(0.3) {
        let second = TITLE_NOUNS.choose(rng).copied().unwrap_or("Story");
        format!("The {} {} of the {}", adjective, noun, second)
    } else {
        format!("{} {}", adjective, noun)
    }
}
