use log::{debug, info};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::database::Movie;
use crate::engine::types::ItemId;
use crate::engine::FittedModel;

/// A fitted model together with the catalog of the snapshot it was fitted on.
#[derive(Debug)]
pub struct CachedModel {
    pub generation: u64,
    /// Storage `data_version` of the snapshot behind the model.
    pub data_version: i64,
    pub model: FittedModel,
    pub catalog: HashMap<ItemId, Movie>,
}

impl CachedModel {
    pub fn new(generation: u64, data_version: i64, model: FittedModel, movies: Vec<Movie>) -> Self {
        Self {
            generation,
            data_version,
            model,
            catalog: movies.into_iter().map(|m| (m.id, m)).collect(),
        }
    }
}

/// Process-wide holder of the last fitted model.
///
/// Every in-process rating write bumps the generation; a cached entry is
/// served only while its generation matches and the caller accepts it as
/// fresh. Rebuilds are serialised so concurrent requests never fit the same
/// data twice.
#[derive(Debug, Default)]
pub struct ModelCache {
    generation: AtomicU64,
    current: RwLock<Option<Arc<CachedModel>>>,
    rebuild: Mutex<()>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Marks the cached model stale; the next request refits.
    pub fn invalidate(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Model cache invalidated, generation is now {}", generation);
    }

    pub fn current(&self) -> Option<Arc<CachedModel>> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|cached| cached.generation == self.generation())
            .cloned()
    }

    /// Returns the cached model if `is_fresh` accepts it, otherwise runs
    /// `build` under the rebuild lock.
    ///
    /// `is_fresh` is checked again once the lock is held, so requests queued
    /// behind a rebuild reuse its result. `build` receives the generation the
    /// result will be tagged with; a write that lands while it runs leaves the
    /// stored entry stale.
    pub fn get_or_rebuild<P, F, E>(&self, is_fresh: P, build: F) -> Result<Arc<CachedModel>, E>
    where
        P: Fn(&CachedModel) -> bool,
        F: FnOnce(u64) -> Result<CachedModel, E>,
    {
        if let Some(cached) = self.fresh(&is_fresh) {
            return Ok(cached);
        }

        let _rebuilding = self.rebuild.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = self.fresh(&is_fresh) {
            debug!("Model rebuilt by a concurrent request");
            return Ok(cached);
        }

        self.rebuild_locked(build)
    }

    fn fresh<P>(&self, is_fresh: &P) -> Option<Arc<CachedModel>>
    where
        P: Fn(&CachedModel) -> bool,
    {
        self.current().filter(|cached| is_fresh(cached.as_ref()))
    }

    fn rebuild_locked<F, E>(&self, build: F) -> Result<Arc<CachedModel>, E>
    where
        F: FnOnce(u64) -> Result<CachedModel, E>,
    {
        let generation = self.generation();
        info!("Rebuilding recommendation model for generation {}", generation);

        let mut fitted = build(generation)?;
        fitted.generation = generation;
        let fitted = Arc::new(fitted);

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::clone(&fitted));
        Ok(fitted)
    }
}
