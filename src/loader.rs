//! Named problem loaders.
//!
//! File formats are handled by callers; the registry only maps problem names
//! to functions producing validated instances, so an unknown name is a
//! typed error instead of a missing-method failure.

use std::collections::BTreeMap;

use crate::error::{AcoError, Result};
use crate::instance::ProblemInstance;

/// A loaded instance together with its best known objective, if any.
#[derive(Debug, Clone)]
pub struct LoadedProblem {
    pub instance: ProblemInstance,
    pub known_optimum: Option<f64>,
}

impl LoadedProblem {
    pub fn new(instance: ProblemInstance) -> Self {
        Self {
            instance,
            known_optimum: None,
        }
    }

    pub fn with_known_optimum(mut self, optimum: f64) -> Self {
        self.known_optimum = Some(optimum);
        self
    }
}

/// Loader function signature.
pub type LoaderFn = Box<dyn Fn() -> Result<LoadedProblem> + Send + Sync>;

/// Registry mapping problem names to loaders.
///
/// # Examples
///
/// ```
/// use u_antcolony::{LoaderRegistry, LoadedProblem, ProblemInstance};
///
/// let mut registry = LoaderRegistry::new();
/// registry.register("pair", || {
///     let inst = ProblemInstance::tsp(vec![vec![0.0, 1.0], vec![1.0, 0.0]])?;
///     Ok(LoadedProblem::new(inst).with_known_optimum(2.0))
/// });
///
/// assert_eq!(registry.load("pair").unwrap().known_optimum, Some(2.0));
/// assert!(registry.load("att48").is_err());
/// ```
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: BTreeMap<String, LoaderFn>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `loader` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, loader: F)
    where
        F: Fn() -> Result<LoadedProblem> + Send + Sync + 'static,
    {
        self.loaders.insert(name.into(), Box::new(loader));
    }

    /// Runs the loader registered under `name`.
    pub fn load(&self, name: &str) -> Result<LoadedProblem> {
        let loader = self.loaders.get(name).ok_or_else(|| {
            AcoError::UnsupportedProblem(format!(
                "{name} (available: {})",
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })?;
        loader()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
