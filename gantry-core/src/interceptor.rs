// Interceptor pipeline wrapping predicate evaluation

use crate::error::Result;
use crate::evaluation::Evaluation;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Type alias for the next stage in the evaluation pipeline
pub type Next<'a> = Box<dyn FnOnce(Evaluation) -> Result<bool> + 'a>;

/// Interceptor wrapping predicate evaluation
///
/// Each stage receives the assembled [`Evaluation`] and a continuation to the
/// next stage, and must call it - or short-circuit deliberately - to preserve
/// evaluation semantics. The innermost stage always invokes the stored
/// predicate. Static detectors resolve before the pipeline and are never
/// intercepted.
pub trait EvaluationInterceptor: Send + Sync {
    fn handle(&self, evaluation: Evaluation, next: Next<'_>) -> Result<bool>;
}

/// Ordered interceptor pipeline executor
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Arc<Vec<Arc<dyn EvaluationInterceptor>>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor to the pipeline
    pub fn use_interceptor<I: EvaluationInterceptor + 'static>(&mut self, interceptor: I) {
        let mut interceptors = (*self.interceptors).clone();
        interceptors.push(Arc::new(interceptor));
        self.interceptors = Arc::new(interceptors);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run an evaluation through the pipeline down to the terminal stage
    pub fn apply<F>(&self, evaluation: Evaluation, terminal: F) -> Result<bool>
    where
        F: Fn(Evaluation) -> Result<bool>,
    {
        trace!(
            feature = %evaluation.feature,
            interceptor_count = self.interceptors.len(),
            "running evaluation pipeline"
        );
        self.execute_from(0, evaluation, &terminal)
    }

    fn execute_from(
        &self,
        index: usize,
        evaluation: Evaluation,
        terminal: &dyn Fn(Evaluation) -> Result<bool>,
    ) -> Result<bool> {
        if index >= self.interceptors.len() {
            return terminal(evaluation);
        }
        let interceptor = self.interceptors[index].clone();
        interceptor.handle(
            evaluation,
            Box::new(move |evaluation| self.execute_from(index + 1, evaluation, terminal)),
        )
    }
}

// ========== Built-in Interceptors ==========

/// Structured logging for every predicate evaluation
pub struct LoggingInterceptor;

impl EvaluationInterceptor for LoggingInterceptor {
    fn handle(&self, evaluation: Evaluation, next: Next<'_>) -> Result<bool> {
        let start = std::time::Instant::now();
        let feature = evaluation.feature.clone();

        let result = next(evaluation);
        let duration = start.elapsed();

        match &result {
            Ok(enabled) => {
                debug!(
                    feature = %feature,
                    enabled = *enabled,
                    duration_us = duration.as_micros() as u64,
                    "feature evaluated"
                );
            }
            Err(err) => {
                warn!(feature = %feature, error = %err, "feature evaluation failed");
            }
        }

        result
    }
}

/// Pins named features on or off, short-circuiting the pipeline
///
/// Operational kill-switch: a pinned feature never reaches its predicate.
/// Only predicate-backed features flow through the pipeline, so a pin has no
/// effect on static detectors.
#[derive(Default)]
pub struct OverrideInterceptor {
    overrides: HashMap<String, bool>,
}

impl OverrideInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin one feature to a fixed result
    pub fn with_override(mut self, feature: impl Into<String>, enabled: bool) -> Self {
        self.overrides.insert(feature.into(), enabled);
        self
    }
}

impl EvaluationInterceptor for OverrideInterceptor {
    fn handle(&self, evaluation: Evaluation, next: Next<'_>) -> Result<bool> {
        if let Some(enabled) = self.overrides.get(&evaluation.feature) {
            debug!(feature = %evaluation.feature, enabled = *enabled, "feature pinned by override");
            return Ok(*enabled);
        }
        next(evaluation)
    }
}
