//! Testing utilities for Gantry feature flags.
//!
//! Test doubles for exercising feature-gated code paths.
//!
//! ## Features
//!
//! - 🎭 **MockEnvironment** - Switchable environment provider
//! - 👁️ **RecordingInterceptor** - Evaluation call tracking
//!
//! ## Quick Start
//!
//! ```
//! use gantry_testing::{MockEnvironment, RecordingInterceptor};
//! use gantry_core::{CheckParams, EnvironmentMap, FeatureRegistry};
//! use std::sync::Arc;
//!
//! let environment = MockEnvironment::new("production");
//! let registry = FeatureRegistry::new(Arc::new(environment.clone()));
//! registry.register(
//!     "dark_mode",
//!     EnvironmentMap::new()
//!         .with("production", true)
//!         .with("staging", false),
//! );
//!
//! assert!(registry.check("dark_mode", CheckParams::new()).unwrap());
//!
//! // Retarget the environment without re-registering
//! environment.set("staging");
//! assert!(!registry.check("dark_mode", CheckParams::new()).unwrap());
//! ```

pub mod mock;

pub use mock::{MockEnvironment, RecordingInterceptor};
