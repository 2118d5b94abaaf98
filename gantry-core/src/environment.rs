// Environment name resolution

use std::env;

/// Supplies the name of the currently active deployment environment
///
/// Per-environment detectors are resolved against `current()`. The provider
/// must return a name present in every per-environment mapping that might be
/// queried; a missing name surfaces as
/// [`FeatureError::MissingEnvironment`](crate::FeatureError::MissingEnvironment).
pub trait EnvironmentProvider: Send + Sync {
    fn current(&self) -> String;
}

/// Environment name decided once, at construction
pub struct FixedEnvironment {
    name: String,
}

impl FixedEnvironment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl EnvironmentProvider for FixedEnvironment {
    fn current(&self) -> String {
        self.name.clone()
    }
}

/// Reads the environment name from a process environment variable
///
/// Defaults to `GANTRY_ENV`, falling back to `development` when the variable
/// is unset.
pub struct EnvVarEnvironment {
    var: String,
    fallback: String,
}

impl EnvVarEnvironment {
    pub fn new() -> Self {
        Self {
            var: "GANTRY_ENV".to_string(),
            fallback: "development".to_string(),
        }
    }

    /// Read from a different variable
    pub fn with_var(mut self, var: impl Into<String>) -> Self {
        self.var = var.into();
        self
    }

    /// Name returned when the variable is unset
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl Default for EnvVarEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentProvider for EnvVarEnvironment {
    fn current(&self) -> String {
        env::var(&self.var).unwrap_or_else(|_| self.fallback.clone())
    }
}
