pub mod connection;
pub mod data_version;
pub mod models;
pub mod movies;
pub mod ratings;
pub mod setup;
pub mod snapshot;
pub mod users;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
pub use snapshot::load_snapshot;
