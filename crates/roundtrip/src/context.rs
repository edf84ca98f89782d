//! Per-run validation state.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::*;

use crate::config::SynthConfig;
use crate::errors::ValidationError;
use crate::introspect::populate;
use crate::record::Record;
use crate::shape::TypeShape;
use crate::shaped::Shaped;
use crate::synth::synthesize;
use crate::value::Value;

/// Owns everything a single validation run mutates: the value cache, the
/// pre-seeded overrides and the RNG.
///
/// Create one per run and pass it by `&mut` to every operation.  There is no
/// internal locking, give each thread its own context.
#[derive(Debug)]
pub struct ValidationContext {
    config: SynthConfig,
    rng: StdRng,
    cache: HashMap<TypeShape, Value>,
    overrides: HashMap<TypeShape, Value>,
}

impl ValidationContext {
    /// Constructs a new context with an empty cache and no overrides.
    pub fn new(config: SynthConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            rng,
            cache: HashMap::new(),
            overrides: HashMap::new(),
        }
    }

    /// Constructs a context with default config and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SynthConfig::default().with_seed(seed))
    }

    /// Returns the run config.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Registers a fixed instance to use instead of generic synthesis for
    /// `T`'s shape.  Overrides win over the cache and are never evicted.
    pub fn seed<T: Shaped>(&mut self, value: T) -> &mut Self {
        let shape = T::shape();
        debug!(%shape, "seeding override");
        self.overrides.insert(shape, value.to_value());
        self
    }

    /// Seeds the instance produced by an explicit factory.  The factory may
    /// draw its arguments from this context.
    pub fn seed_with<T, F>(&mut self, factory: F) -> Result<&mut Self, ValidationError>
    where
        T: Shaped,
        F: FnOnce(&mut Self) -> Result<T, ValidationError>,
    {
        let value = factory(self)?;
        Ok(self.seed(value))
    }

    /// Seeds an instance of `R` built through its own schema: default
    /// construction followed by every discovered mutator.
    pub fn seed_record<R: Record + Shaped>(&mut self) -> Result<&mut Self, ValidationError> {
        let value = populate::<R>(self)?;
        Ok(self.seed(value))
    }

    /// Synthesizes a value for a shape.  See [`synthesize`].
    pub fn synthesize(&mut self, shape: &TypeShape) -> Result<Value, ValidationError> {
        synthesize(shape, self)
    }

    /// Synthesizes a typed value.
    pub fn value<T: Shaped>(&mut self) -> Result<T, ValidationError> {
        let value = self.synthesize(&T::shape())?;
        T::from_value(&value)
    }

    /// Returns if a generated value is memoized for the shape.
    pub fn is_cached(&self, shape: &TypeShape) -> bool {
        self.cache.contains_key(shape)
    }

    /// Returns if an override is registered for the shape.
    pub fn is_seeded(&self, shape: &TypeShape) -> bool {
        self.overrides.contains_key(shape)
    }

    pub(crate) fn lookup(&self, shape: &TypeShape) -> Option<&Value> {
        self.overrides.get(shape).or_else(|| self.cache.get(shape))
    }

    pub(crate) fn remember(&mut self, shape: TypeShape, value: Value) {
        self.cache.insert(shape, value);
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(SynthConfig::default())
    }
}
