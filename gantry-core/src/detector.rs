//! Detector Model
//!
//! Defines the decision rules a feature can be registered with. The shape of
//! a detector is decided once, at registration time; resolution dispatches on
//! the variant without any runtime type inspection.

use crate::evaluation::Evaluation;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A shared, cloneable predicate evaluated once per check
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Evaluation) -> bool + Send + Sync>);

impl Predicate {
    /// Wrap a closure as a predicate
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_core::Predicate;
    ///
    /// let beta_users = Predicate::new(|eval| eval.request_attr("beta").is_some());
    /// ```
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Evaluation) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Invoke the predicate with an assembled evaluation
    pub fn evaluate(&self, evaluation: &Evaluation) -> bool {
        (*self.0)(evaluation)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// The decision rule for one feature
///
/// - `Static` - the feature is unconditionally on or off.
/// - `Predicate` - evaluated per check against the assembled [`Evaluation`].
/// - `PerEnvironment` - resolved by looking up the active environment name;
///   the selected entry is itself a static value or a predicate.
#[derive(Debug, Clone)]
pub enum Detector {
    Static(bool),
    Predicate(Predicate),
    PerEnvironment(EnvironmentMap),
}

impl Detector {
    /// Create a predicate detector from a closure
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Evaluation) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::new(predicate))
    }
}

impl From<bool> for Detector {
    fn from(enabled: bool) -> Self {
        Self::Static(enabled)
    }
}

impl From<Predicate> for Detector {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl From<EnvironmentMap> for Detector {
    fn from(environments: EnvironmentMap) -> Self {
        Self::PerEnvironment(environments)
    }
}

/// Detector shape permitted inside a per-environment mapping
///
/// Per-environment entries resolve to a static value or a predicate; nesting
/// another environment mapping is not representable.
#[derive(Debug, Clone)]
pub enum EnvDetector {
    Static(bool),
    Predicate(Predicate),
}

impl EnvDetector {
    /// Create a predicate entry from a closure
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Evaluation) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::new(predicate))
    }
}

impl From<bool> for EnvDetector {
    fn from(enabled: bool) -> Self {
        Self::Static(enabled)
    }
}

impl From<Predicate> for EnvDetector {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

/// Builder for per-environment detector mappings
///
/// # Examples
///
/// ```
/// use gantry_core::{Detector, EnvironmentMap};
///
/// let detector: Detector = EnvironmentMap::new()
///     .with("production", true)
///     .with("staging", false)
///     .into();
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvironmentMap {
    entries: HashMap<String, EnvDetector>,
}

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry for one environment
    pub fn with(mut self, environment: impl Into<String>, detector: impl Into<EnvDetector>) -> Self {
        self.entries.insert(environment.into(), detector.into());
        self
    }

    /// Look up the entry for an environment name
    pub fn get(&self, environment: &str) -> Option<&EnvDetector> {
        self.entries.get(environment)
    }

    pub fn contains(&self, environment: &str) -> bool {
        self.entries.contains_key(environment)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, EnvDetector)> for EnvironmentMap {
    fn from_iter<I: IntoIterator<Item = (String, EnvDetector)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
