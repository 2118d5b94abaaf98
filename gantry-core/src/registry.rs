//! Feature Registry
//!
//! Owns every registered detector and performs all resolution. Detector
//! storage is read-mostly: registration replaces whole values under a write
//! lock, checks take read locks, and readers never observe a half-updated
//! per-environment mapping.

use crate::detector::{Detector, EnvDetector, Predicate};
use crate::environment::EnvironmentProvider;
use crate::error::{FeatureError, Result};
use crate::evaluation::{CheckParams, Evaluation, RequestContext};
use crate::interceptor::{EvaluationInterceptor, InterceptorChain};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// Reserved name whose detector is consulted for any feature with no
/// explicit registration. Stored like any other key.
pub const DEFAULT_FEATURE: &str = "__default";

/// Registry of named features and their detectors
///
/// Cheap to clone; clones share the same storage. Construct once at startup
/// and hand shared references to call sites rather than keeping global state.
///
/// # Examples
///
/// ```
/// use gantry_core::{CheckParams, Detector, FeatureRegistry, FixedEnvironment};
/// use std::sync::Arc;
///
/// let registry = FeatureRegistry::new(Arc::new(FixedEnvironment::new("production")));
/// registry.register("new_ui", true);
/// registry.register("beta_search", Detector::predicate(|eval| {
///     eval.request_attr("beta").is_some()
/// }));
///
/// assert!(registry.check("new_ui", CheckParams::new()).unwrap());
/// ```
#[derive(Clone)]
pub struct FeatureRegistry {
    features: Arc<RwLock<HashMap<String, Detector>>>,
    interceptors: Arc<RwLock<InterceptorChain>>,
    environment: Arc<dyn EnvironmentProvider>,
    request_context: Arc<RwLock<Option<Weak<RequestContext>>>>,
}

impl FeatureRegistry {
    pub fn new(environment: Arc<dyn EnvironmentProvider>) -> Self {
        Self {
            features: Arc::new(RwLock::new(HashMap::new())),
            interceptors: Arc::new(RwLock::new(InterceptorChain::new())),
            environment,
            request_context: Arc::new(RwLock::new(None)),
        }
    }

    /// Register a detector under a name, replacing any existing entry
    ///
    /// Accepts anything coercible to a [`Detector`]: a raw boolean becomes
    /// [`Detector::Static`], an [`EnvironmentMap`](crate::EnvironmentMap)
    /// becomes [`Detector::PerEnvironment`]. Returns the stored detector.
    /// Last write wins; there is no deletion primitive beyond [`reset`](Self::reset).
    pub fn register(&self, name: impl Into<String>, detector: impl Into<Detector>) -> Detector {
        let name = name.into();
        let detector = detector.into();
        debug!(feature = %name, "registered feature detector");
        self.features.write().insert(name, detector.clone());
        detector
    }

    /// Register the fallback detector consulted for unregistered names
    ///
    /// The fallback decides per name whether to enable: it is evaluated with
    /// the queried feature's name, never with the reserved key. It is
    /// consulted only when no explicit entry exists - an explicit detector
    /// that evaluates to `false` stands.
    pub fn register_default(&self, detector: impl Into<Detector>) -> Detector {
        self.register(DEFAULT_FEATURE, detector)
    }

    /// Check whether a feature is enabled
    ///
    /// Resolution order:
    /// 1. Look up the name; if absent, fall through to the default detector.
    /// 2. A per-environment detector selects the entry for the environment
    ///    provider's current name; a missing entry is a
    ///    [`FeatureError::MissingEnvironment`].
    /// 3. A static value is returned directly. A predicate is run through the
    ///    interceptor pipeline against the assembled [`Evaluation`], using the
    ///    stored request context if the host still holds it.
    /// 4. With no explicit entry and no default, the feature is disabled.
    ///
    /// A panicking predicate is not suppressed; the panic propagates to the
    /// caller.
    pub fn check(&self, name: &str, params: CheckParams) -> Result<bool> {
        let request = self
            .request_context
            .read()
            .as_ref()
            .and_then(Weak::upgrade);
        self.resolve(name, params, request)
    }

    /// Check with an explicit request context for this call only
    ///
    /// Bypasses the stored context entirely, so concurrent logical requests
    /// can evaluate against their own data without cross-request interference.
    pub fn check_with_context(
        &self,
        name: &str,
        params: CheckParams,
        request: Arc<RequestContext>,
    ) -> Result<bool> {
        self.resolve(name, params, Some(request))
    }

    /// Compute `check` for every registered name
    ///
    /// The reserved default entry is stored like any other key and is
    /// therefore included in the result; hosts that want it hidden can filter
    /// the returned map. Returns an empty map when nothing is registered.
    pub fn export(&self, params: CheckParams) -> Result<HashMap<String, bool>> {
        let names: Vec<String> = self.features.read().keys().cloned().collect();
        let mut report = HashMap::with_capacity(names.len());
        for name in names {
            let enabled = self.check(&name, params.clone())?;
            report.insert(name, enabled);
        }
        Ok(report)
    }

    /// Replace the stored request context used by subsequent checks
    ///
    /// The registry holds the context weakly: it does not keep it alive, and
    /// a context the host has dropped evaluates as absent rather than stale.
    pub fn set_request_context(&self, context: &Arc<RequestContext>) {
        *self.request_context.write() = Some(Arc::downgrade(context));
    }

    pub fn clear_request_context(&self) {
        *self.request_context.write() = None;
    }

    /// Append an interceptor to the evaluation pipeline
    pub fn use_interceptor<I: EvaluationInterceptor + 'static>(&self, interceptor: I) {
        self.interceptors.write().use_interceptor(interceptor);
    }

    /// Remove every registered detector
    pub fn reset(&self) {
        debug!("feature registry reset");
        self.features.write().clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.features.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.features.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.read().is_empty()
    }

    /// Names of every registered feature, in storage order
    pub fn names(&self) -> Vec<String> {
        self.features.read().keys().cloned().collect()
    }

    fn resolve(
        &self,
        name: &str,
        params: CheckParams,
        request: Option<Arc<RequestContext>>,
    ) -> Result<bool> {
        let detector = self.features.read().get(name).cloned();
        if let Some(detector) = detector {
            return self.dispatch(name, detector, params, request);
        }

        let fallback = self.features.read().get(DEFAULT_FEATURE).cloned();
        match fallback {
            Some(detector) => {
                trace!(feature = name, "no explicit detector, consulting default");
                self.dispatch(name, detector, params, request)
            }
            None => {
                trace!(feature = name, "unknown feature, disabled");
                Ok(false)
            }
        }
    }

    fn dispatch(
        &self,
        name: &str,
        detector: Detector,
        params: CheckParams,
        request: Option<Arc<RequestContext>>,
    ) -> Result<bool> {
        let predicate = match detector {
            Detector::Static(enabled) => return Ok(enabled),
            Detector::Predicate(predicate) => predicate,
            Detector::PerEnvironment(environments) => {
                let environment = self.environment.current();
                match environments.get(&environment) {
                    Some(EnvDetector::Static(enabled)) => return Ok(*enabled),
                    Some(EnvDetector::Predicate(predicate)) => predicate.clone(),
                    None => {
                        return Err(FeatureError::MissingEnvironment {
                            feature: name.to_string(),
                            environment,
                        });
                    }
                }
            }
        };

        self.invoke(name, predicate, params, request)
    }

    fn invoke(
        &self,
        name: &str,
        predicate: Predicate,
        params: CheckParams,
        request: Option<Arc<RequestContext>>,
    ) -> Result<bool> {
        let evaluation = Evaluation {
            feature: name.to_string(),
            params,
            request,
            detector: predicate,
        };
        let chain = self.interceptors.read().clone();
        chain.apply(evaluation, |evaluation| {
            Ok(evaluation.detector.evaluate(&evaluation))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::FixedEnvironment;

    fn registry() -> FeatureRegistry {
        FeatureRegistry::new(Arc::new(FixedEnvironment::new("production")))
    }

    #[test]
    fn test_register_returns_stored_detector() {
        let registry = registry();
        let stored = registry.register("new_ui", true);
        assert!(matches!(stored, Detector::Static(true)));
        assert!(registry.contains("new_ui"));
    }

    #[test]
    fn test_check_static() {
        let registry = registry();
        registry.register("feature_true", true);
        registry.register("feature_false", false);

        assert!(registry.check("feature_true", CheckParams::new()).unwrap());
        assert!(!registry.check("feature_false", CheckParams::new()).unwrap());
    }

    #[test]
    fn test_reregistration_replaces() {
        let registry = registry();
        registry.register("flip", false);
        registry.register("flip", true);

        assert!(registry.check("flip", CheckParams::new()).unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let registry = registry();
        registry.register("a", true);
        registry.register("b", false);
        registry.reset();

        assert!(registry.is_empty());
        assert!(!registry.check("a", CheckParams::new()).unwrap());
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = registry();
        let clone = registry.clone();
        clone.register("shared", true);

        assert!(registry.check("shared", CheckParams::new()).unwrap());
    }
}
