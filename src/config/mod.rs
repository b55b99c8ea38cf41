pub mod settings;

pub use settings::{database_path, AppConfig, EngineSettings, SeedSettings};
