// Gantry - feature flags and staged release gating for Rust services
//
// This library provides a registry-based approach to feature gating with
// static, predicate, and per-environment detectors, an interceptor pipeline
// around evaluation, and pluggable environment providers.

// Re-export core functionality
pub use gantry_core::*;

// Re-export optional crates
#[cfg(feature = "testing")]
pub use gantry_testing;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CheckParams,
        Detector,
        EnvDetector,
        EnvVarEnvironment,
        EnvironmentMap,
        EnvironmentProvider,
        Evaluation,
        EvaluationInterceptor,
        FeatureError,
        FeatureRegistry,
        FixedEnvironment,
        FlagDefinition,
        InterceptorChain,
        LoggingInterceptor,
        Next,
        OverrideInterceptor,
        Predicate,
        RequestContext,
        DEFAULT_FEATURE,
    };
}
