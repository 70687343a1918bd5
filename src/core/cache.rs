//! Process-wide cache of loaded classifier models.
//!
//! Loading the BERT weights dominates start-up time, so pipelines built with
//! the same options on the same device share one model handle.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Implemented by model option types to produce a stable cache key.
pub trait ModelOptions {
    fn cache_key(&self) -> String;
}

type CacheStorage = HashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>;

/// A thread-safe cache keyed by model type and option key.
///
/// Models stored here are expected to be cheap to clone (weights behind an
/// `Arc`), so a hit hands back a clone sharing the same tensors.
pub struct ModelCache {
    cache: Mutex<CacheStorage>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn storage(&self) -> MutexGuard<'_, CacheStorage> {
        // A loader that panicked cannot have inserted anything, so the map is still consistent.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached model for `key`, calling `loader` on a miss.
    ///
    /// The lock is not held while `loader` runs; two concurrent misses may both
    /// load, and the last one wins the slot.
    pub fn get_or_create<M, F>(&self, key: &str, loader: F) -> anyhow::Result<M>
    where
        M: Clone + Send + Sync + 'static,
        F: FnOnce() -> anyhow::Result<M>,
    {
        let cache_key = (TypeId::of::<M>(), key.to_string());

        if let Some(model) = self
            .storage()
            .get(&cache_key)
            .and_then(|cached| cached.downcast_ref::<M>())
        {
            tracing::debug!(key, "model cache hit");
            return Ok(model.clone());
        }

        tracing::debug!(key, "model cache miss, loading");
        let model = loader()?;
        self.storage()
            .insert(cache_key, Arc::new(model.clone()) as Arc<dyn Any + Send + Sync>);

        Ok(model)
    }

    pub fn clear(&self) {
        self.storage().clear();
    }

    pub fn len(&self) -> usize {
        self.storage().len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage().is_empty()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_MODEL_CACHE: once_cell::sync::Lazy<ModelCache> =
    once_cell::sync::Lazy::new(ModelCache::new);

/// The cache shared by every pipeline builder in the process.
pub fn global_cache() -> &'static ModelCache {
    &GLOBAL_MODEL_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct FakeModel {
        id: String,
    }

    #[test]
    fn second_lookup_reuses_first_model() {
        let cache = ModelCache::new();

        let first = cache
            .get_or_create::<FakeModel, _>("bert-cpu", || {
                Ok(FakeModel {
                    id: "original".to_string(),
                })
            })
            .unwrap();

        let second = cache
            .get_or_create::<FakeModel, _>("bert-cpu", || {
                panic!("loader must not run on a cache hit")
            })
            .unwrap();

        assert_eq!(first.id, "original");
        assert_eq!(second.id, "original");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let cache = ModelCache::new();
        let err = cache.get_or_create::<FakeModel, _>("broken", || anyhow::bail!("no weights"));
        assert!(err.is_err());
        assert!(cache.is_empty());
    }
}
