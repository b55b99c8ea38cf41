pub mod model_cache;

pub use model_cache::{CachedModel, ModelCache};
