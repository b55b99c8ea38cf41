use anyhow::Result;

use movie_recommender::cli::Command;
use movie_recommender::{handle_recommend, handle_seed, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port, no_cache } => handle_serve(*port, *no_cache),
        Command::Seed {
            users,
            movies,
            ratings_per_user,
            seed,
        } => handle_seed(*users, *movies, *ratings_per_user, *seed),
        Command::Recommend { user_id } => handle_recommend(*user_id),
    }
}
