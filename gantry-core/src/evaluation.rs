// Evaluation parameter plumbing: what a predicate sees when it runs

use crate::detector::Predicate;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Caller-supplied parameters for a single check
///
/// String-keyed, arbitrary JSON values. Merged into the [`Evaluation`] handed
/// to predicates and interceptors.
#[derive(Debug, Clone, Default)]
pub struct CheckParams {
    values: HashMap<String, Value>,
}

impl CheckParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_core::CheckParams;
    ///
    /// let params = CheckParams::new().with("feature", true).with("cohort", "beta");
    /// assert_eq!(params.get_bool("feature"), Some(true));
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, Value>> for CheckParams {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

/// Per-request data injected into predicate evaluations
///
/// Owned by the host; the registry holds it weakly and never controls its
/// lifecycle. Predicates that depend on request data must handle its absence.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    attributes: HashMap<String, Value>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(self, user_id: impl Into<String>) -> Self {
        self.with_attribute("user_id", user_id.into())
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.attributes.get("user_id").and_then(Value::as_str)
    }
}

/// The assembled parameter mapping for one predicate evaluation
///
/// Carries the queried feature name, the caller's params, the current request
/// context (if any), and the predicate under evaluation. Interceptors receive
/// it on the way in; the innermost pipeline stage hands it to the predicate.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Name the caller checked, which for default-detector evaluations is the
    /// queried name rather than the reserved default key.
    pub feature: String,
    pub params: CheckParams,
    pub request: Option<Arc<RequestContext>>,
    pub detector: Predicate,
}

impl Evaluation {
    /// Caller-supplied parameter by key
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Request context attribute by key, `None` when no context is present
    pub fn request_attr(&self, key: &str) -> Option<&Value> {
        self.request.as_deref().and_then(|request| request.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_builder() {
        let mut params = CheckParams::new().with("feature", false).with("cohort", "beta");
        params.insert("retries", 3);
        assert_eq!(params.get_bool("feature"), Some(false));
        assert_eq!(params.get_str("cohort"), Some("beta"));
        assert!(params.get("missing").is_none());
        assert_eq!(params.len(), 3);
        assert!(!params.is_empty());
    }

    #[test]
    fn test_request_context_attributes() {
        let context = RequestContext::new()
            .with_user_id("user-42")
            .with_attribute("beta", true);
        assert_eq!(context.user_id(), Some("user-42"));
        assert_eq!(context.get("beta").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_evaluation_access() {
        let evaluation = Evaluation {
            feature: "new_ui".to_string(),
            params: CheckParams::new().with("rollout", 25),
            request: Some(Arc::new(RequestContext::new().with_user_id("user-1"))),
            detector: Predicate::new(|_| true),
        };

        assert_eq!(evaluation.param("rollout").and_then(Value::as_u64), Some(25));
        assert_eq!(
            evaluation.request_attr("user_id").and_then(Value::as_str),
            Some("user-1")
        );
        assert!(evaluation.request_attr("missing").is_none());
    }

    #[test]
    fn test_evaluation_without_request() {
        let evaluation = Evaluation {
            feature: "new_ui".to_string(),
            params: CheckParams::new(),
            request: None,
            detector: Predicate::new(|_| true),
        };
        assert!(evaluation.request_attr("user_id").is_none());
    }
}
