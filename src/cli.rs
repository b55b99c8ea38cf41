use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "k-means movie recommender")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the recommendation server
    Serve {
        /// Port number (optional, defaults to 8001)
        #[arg(short, long, default_value_t = 8001)]
        port: u16,
        /// Refit the model on every request instead of caching it
        #[arg(long)]
        no_cache: bool,
    },
    /// Replace the database contents with synthetic users, movies and ratings
    Seed {
        #[arg(long, default_value_t = 50)]
        users: usize,
        #[arg(long, default_value_t = 100)]
        movies: usize,
        #[arg(long, default_value_t = 10)]
        ratings_per_user: usize,
        /// Random seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print recommendations for a user
    Recommend {
        /// User id
        user_id: i64,
    },
}
