#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub clusters: usize,
    pub random_seed: u64,
    pub max_iterations: usize,
    pub top_n: usize,
    pub include_self_in_peers: bool,
    pub dilute_unrated_peers: bool,
    pub cache_model: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            clusters: 5,
            random_seed: 42,
            max_iterations: 300,
            top_n: 10,
            include_self_in_peers: true,
            dilute_unrated_peers: true,
            cache_model: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeedSettings {
    pub users: usize,
    pub movies: usize,
    pub ratings_per_user: usize,
    pub first_year: i32,
    pub last_year: i32,
    pub rating_mean: f64,
    pub rating_std_dev: f64,
    pub seed: Option<u64>,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            users: 50,
            movies: 100,
            ratings_per_user: 10,
            first_year: 1990,
            last_year: 2023,
            rating_mean: 3.0,
            rating_std_dev: 1.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineSettings,
    pub seeding: SeedSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            engine: EngineSettings::default(),
            seeding: SeedSettings::default(),
        }
    }
}

const DEFAULT_DATABASE_PATH: &str = "movie_recommender.db";

pub fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string())
}
