pub mod recommending;
pub mod seeding;
pub mod server;

pub use recommending::RecommendationService;
pub use seeding::{SeedSummary, SeedingService};
pub use server::ServerService;
