pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod engine;
pub mod errors;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use colored::Colorize;

use crate::api::models::MovieRecommendation;
use crate::cache::ModelCache;
use crate::cli::Command;
use crate::config::{database_path, AppConfig};
use crate::services::{RecommendationService, SeedingService, ServerService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16, no_cache: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut config = AppConfig::new();
        config.engine.cache_model = !no_cache;
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_seed(users: usize, movies: usize, ratings_per_user: usize, seed: Option<u64>) -> Result<()> {
    let mut config = AppConfig::new();
    config.seeding.users = users;
    config.seeding.movies = movies;
    config.seeding.ratings_per_user = ratings_per_user;
    config.seeding.seed = seed;

    let pool = database::create_pool(&database_path())?;
    let summary = SeedingService::new(pool, config.seeding).run()?;
    println!(
        "{} {} users, {} movies, {} ratings",
        "Seeded".green().bold(),
        summary.users,
        summary.movies,
        summary.ratings
    );
    Ok(())
}

pub fn handle_recommend(user_id: i64) -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&database_path())?;
    let conn = database::get_connection(&pool)?;
    database::setup::ensure_schema(&conn)?;
    drop(conn);
    let cache = ModelCache::new();

    let recommendations = RecommendationService::new(&pool, &config.engine, &cache).recommend_for_user(user_id)?;
    print_recommendations(user_id, &recommendations);
    Ok(())
}

fn print_recommendations(user_id: i64, recommendations: &[MovieRecommendation]) {
    println!("{}", format!("Recommendations for user {}", user_id).bold());
    println!(
        "{:>4}  {:>6}  {:<40} {:<12} {:>5}  {}",
        "#".dimmed(),
        "id".dimmed(),
        "title".dimmed(),
        "category".dimmed(),
        "year".dimmed(),
        "score".dimmed()
    );
    for (rank, r) in recommendations.iter().enumerate() {
        println!(
            "{:>4}  {:>6}  {:<40} {:<12} {:>5}  {}",
            rank + 1,
            r.item_id,
            r.title,
            r.category.cyan(),
            r.year,
            format!("{:.2}", r.predicted_rating).yellow()
        );
    }
}
