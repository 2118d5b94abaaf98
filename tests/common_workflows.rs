//! End-to-end workflows through the gantry facade

use gantry::prelude::*;
use gantry_testing::{MockEnvironment, RecordingInterceptor};
use serde_json::{json, Value};
use std::sync::Arc;

#[test]
fn test_staged_rollout_workflow() {
    let environment = MockEnvironment::new("staging");
    let registry = FeatureRegistry::new(Arc::new(environment.clone()));
    let recorder = RecordingInterceptor::new();
    registry.use_interceptor(recorder.clone());

    // Bootstrap the static portion of the flag set from configuration
    registry
        .load_definitions(json!({
            "new_checkout": {"production": false, "staging": true},
            "legacy_export": false
        }))
        .unwrap();

    // Gate the risky path on request data, staging-only
    registry.register(
        "bulk_import",
        EnvironmentMap::new()
            .with("production", false)
            .with(
                "staging",
                EnvDetector::predicate(|eval| {
                    eval.request_attr("internal").and_then(Value::as_bool).unwrap_or(false)
                }),
            ),
    );

    let internal = Arc::new(RequestContext::new().with_user_id("qa-7").with_attribute("internal", true));

    assert!(registry.check("new_checkout", CheckParams::new()).unwrap());
    assert!(registry
        .check_with_context("bulk_import", CheckParams::new(), internal.clone())
        .unwrap());

    // Promote to production: same registry, different environment
    environment.set("production");
    assert!(!registry.check("new_checkout", CheckParams::new()).unwrap());
    assert!(!registry
        .check_with_context("bulk_import", CheckParams::new(), internal)
        .unwrap());

    // Only predicate-backed checks flow through the pipeline
    assert!(recorder.was_evaluated("bulk_import"));
    assert!(!recorder.was_evaluated("new_checkout"));

    let report = registry.export(CheckParams::new()).unwrap();
    assert_eq!(report.len(), 3);
    assert_eq!(report.get("legacy_export"), Some(&false));
}

#[test]
fn test_request_gated_feature_workflow() {
    let registry = FeatureRegistry::new(Arc::new(FixedEnvironment::new("production")));
    let recorder = RecordingInterceptor::new();
    registry.use_interceptor(recorder.clone());

    registry.register(
        "beta_dashboard",
        Detector::predicate(|eval| {
            eval.request_attr("plan").and_then(Value::as_str) == Some("beta")
        }),
    );

    let beta_user = Arc::new(RequestContext::new().with_user_id("user-1").with_attribute("plan", "beta"));
    let free_user = Arc::new(RequestContext::new().with_user_id("user-2").with_attribute("plan", "free"));

    registry.set_request_context(&beta_user);
    assert!(registry.check("beta_dashboard", CheckParams::new()).unwrap());

    registry.set_request_context(&free_user);
    assert!(!registry.check("beta_dashboard", CheckParams::new()).unwrap());

    assert_eq!(
        recorder.results(),
        vec![
            ("beta_dashboard".to_string(), true),
            ("beta_dashboard".to_string(), false),
        ]
    );
}

#[test]
fn test_kill_switch_workflow() {
    let registry = FeatureRegistry::new(Arc::new(FixedEnvironment::new("production")));

    // Rollout predicate misbehaving in production: pin it off without a deploy
    registry.register(
        "expensive_recompute",
        Detector::predicate(|eval| eval.params.get_bool("opted_in").unwrap_or(true)),
    );
    registry.use_interceptor(OverrideInterceptor::new().with_override("expensive_recompute", false));

    assert!(!registry
        .check("expensive_recompute", CheckParams::new().with("opted_in", true))
        .unwrap());
}

#[test]
fn test_default_detector_workflow() {
    let registry = FeatureRegistry::new(Arc::new(FixedEnvironment::new("production")));

    // Everything prefixed "experiment_" is on unless explicitly registered
    registry.register_default(Detector::predicate(|eval| {
        eval.feature.starts_with("experiment_")
    }));
    registry.register("experiment_abandoned", false);

    assert!(registry.check("experiment_ranking", CheckParams::new()).unwrap());
    assert!(!registry.check("experiment_abandoned", CheckParams::new()).unwrap());
    assert!(!registry.check("checkout_v2", CheckParams::new()).unwrap());
}
