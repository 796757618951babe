#![forbid(unsafe_code)]

use crate::error::GenerateError;
use crate::model::{BigramModel, ModelId, TextGenerator};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::info;

/// Constructs a generator for a model id. Injectable so tests can supply
/// stub generators instead of the built-in models.
pub type LoaderFn = Box<dyn Fn(ModelId) -> Result<Box<dyn TextGenerator>, GenerateError> + Send>;

/// Per-process generator cache keyed by model id.
///
/// Each id is constructed lazily on first use and kept for the process
/// lifetime; the cache is never evicted. Switching ids yields a distinct
/// cached instance, never a reuse of the previous one.
pub struct GeneratorCache {
    loader: LoaderFn,
    instances: HashMap<ModelId, Box<dyn TextGenerator>>,
}

impl GeneratorCache {
    /// Cache backed by the built-in bigram models.
    pub fn new() -> Self {
        Self::with_loader(Box::new(|id| {
            info!(model = %id, "loading generator");
            Ok(Box::new(BigramModel::load(id)) as Box<dyn TextGenerator>)
        }))
    }

    /// Cache backed by a custom loader (stub injection point for tests).
    pub fn with_loader(loader: LoaderFn) -> Self {
        Self {
            loader,
            instances: HashMap::new(),
        }
    }

    /// Get the generator for `id`, constructing it on first use.
    pub fn get(&mut self, id: ModelId) -> Result<&dyn TextGenerator, GenerateError> {
        let slot = match self.instances.entry(id) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(v) => v.insert((self.loader)(id)?),
        };
        Ok(&**slot)
    }

    /// Number of constructed instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// True when nothing has been constructed yet.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for GeneratorCache {
    fn default() -> Self {
        Self::new()
    }
}
