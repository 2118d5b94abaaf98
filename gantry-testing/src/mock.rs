// Mock utilities for testing feature gating

use gantry_core::{EnvironmentProvider, Evaluation, EvaluationInterceptor, Next, Result};
use std::sync::{Arc, Mutex, RwLock};

/// Environment provider whose current environment can be changed at runtime
///
/// Lets a test flip the active environment between checks without
/// re-registering any detectors.
#[derive(Clone)]
pub struct MockEnvironment {
    current: Arc<RwLock<String>>,
}

impl MockEnvironment {
    /// Create a mock provider reporting the given environment
    pub fn new(initial: &str) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial.to_string())),
        }
    }

    /// Switch the reported environment
    pub fn set(&self, environment: &str) {
        *self.current.write().unwrap() = environment.to_string();
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn current(&self) -> String {
        self.current.read().unwrap().clone()
    }
}

/// Interceptor that records every evaluation flowing through the pipeline
#[derive(Clone, Default)]
pub struct RecordingInterceptor {
    evaluations: Arc<Mutex<Vec<(String, bool)>>>,
}

impl RecordingInterceptor {
    /// Create a new recording interceptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded evaluations
    pub fn count(&self) -> usize {
        self.evaluations.lock().unwrap().len()
    }

    /// Check whether a feature was evaluated
    pub fn was_evaluated(&self, feature: &str) -> bool {
        self.evaluations
            .lock()
            .unwrap()
            .iter()
            .any(|(name, _)| name == feature)
    }

    /// All recorded `(feature, result)` pairs, in evaluation order
    pub fn results(&self) -> Vec<(String, bool)> {
        self.evaluations.lock().unwrap().clone()
    }

    /// Clear all recorded evaluations
    pub fn clear(&self) {
        self.evaluations.lock().unwrap().clear();
    }
}

impl EvaluationInterceptor for RecordingInterceptor {
    fn handle(&self, evaluation: Evaluation, next: Next<'_>) -> Result<bool> {
        let feature = evaluation.feature.clone();
        let result = next(evaluation);
        if let Ok(enabled) = &result {
            self.evaluations.lock().unwrap().push((feature, *enabled));
        }
        result
    }
}
