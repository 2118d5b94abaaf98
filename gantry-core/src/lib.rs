//! Feature Flag Engine for Gantry
//!
//! Registry-based feature gating: register named features with a decision
//! rule and ask whether a feature is enabled for the current request and
//! deployment environment.
//!
//! # Features
//!
//! - 🚀 **Static Flags** - Toggle features unconditionally on or off
//! - 🎯 **Predicates** - Per-check decisions against request data
//! - 🌍 **Per-Environment** - Different rules for production, staging, ...
//! - 🪝 **Interceptors** - Wrap evaluation with logging, overrides, caching
//! - 📦 **Bulk Export** - Snapshot every flag's state in one call
//!
//! # Quick Start
//!
//! ```
//! use gantry_core::{CheckParams, Detector, FeatureRegistry, FixedEnvironment};
//! use std::sync::Arc;
//!
//! let registry = FeatureRegistry::new(Arc::new(FixedEnvironment::new("production")));
//!
//! // Unconditionally on
//! registry.register("new_ui", true);
//!
//! // Decided per check
//! registry.register("beta_search", Detector::predicate(|eval| {
//!     eval.request_attr("beta").is_some()
//! }));
//!
//! assert!(registry.check("new_ui", CheckParams::new()).unwrap());
//! assert!(!registry.check("beta_search", CheckParams::new()).unwrap());
//! ```
//!
//! # Per-Environment Detectors
//!
//! ```
//! use gantry_core::{CheckParams, EnvironmentMap, FeatureRegistry, FixedEnvironment};
//! use std::sync::Arc;
//!
//! let registry = FeatureRegistry::new(Arc::new(FixedEnvironment::new("production")));
//! registry.register(
//!     "dark_mode",
//!     EnvironmentMap::new()
//!         .with("production", true)
//!         .with("staging", false),
//! );
//!
//! assert!(registry.check("dark_mode", CheckParams::new()).unwrap());
//! ```
//!
//! # Default Detector
//!
//! A detector registered under [`DEFAULT_FEATURE`] is consulted for names
//! with no explicit entry - and only for those:
//!
//! ```
//! use gantry_core::{CheckParams, Detector, FeatureRegistry, FixedEnvironment};
//! use std::sync::Arc;
//!
//! let registry = FeatureRegistry::new(Arc::new(FixedEnvironment::new("production")));
//! registry.register_default(Detector::predicate(|eval| eval.feature.starts_with("beta_")));
//!
//! assert!(registry.check("beta_upload", CheckParams::new()).unwrap());
//! assert!(!registry.check("upload", CheckParams::new()).unwrap());
//! ```

pub mod definition;
pub mod detector;
pub mod environment;
pub mod error;
pub mod evaluation;
pub mod interceptor;
pub mod registry;

pub use definition::FlagDefinition;
pub use detector::{Detector, EnvDetector, EnvironmentMap, Predicate};
pub use environment::{EnvVarEnvironment, EnvironmentProvider, FixedEnvironment};
pub use error::{FeatureError, Result};
pub use evaluation::{CheckParams, Evaluation, RequestContext};
pub use interceptor::{
    EvaluationInterceptor, InterceptorChain, LoggingInterceptor, Next, OverrideInterceptor,
};
pub use registry::{FeatureRegistry, DEFAULT_FEATURE};
