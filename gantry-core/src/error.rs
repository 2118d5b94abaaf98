// Error types for feature resolution

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeatureError {
    /// A per-environment detector has no entry for the active environment.
    ///
    /// This is a configuration error, not a disabled feature: resolution
    /// never degrades to `false` when the environment mapping is incomplete.
    #[error("feature '{feature}' has no detector for environment '{environment}'")]
    MissingEnvironment { feature: String, environment: String },

    #[error("invalid flag definition: {0}")]
    InvalidDefinition(String),

    /// An interceptor aborted the evaluation pipeline.
    #[error("evaluation of feature '{feature}' failed: {reason}")]
    Evaluation { feature: String, reason: String },
}

pub type Result<T> = std::result::Result<T, FeatureError>;
