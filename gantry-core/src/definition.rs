// Data-driven flag definitions for bootstrap configuration

use crate::detector::{Detector, EnvDetector};
use crate::error::{FeatureError, Result};
use crate::registry::FeatureRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flag definition as found in configuration data
///
/// A bare boolean becomes a static detector; a map of environment names to
/// booleans becomes a per-environment detector. Predicates cannot be declared
/// in data - they are registered in code.
///
/// ```
/// use gantry_core::FlagDefinition;
///
/// let definition: FlagDefinition = serde_json::from_str(r#"{"production": true, "staging": false}"#).unwrap();
/// assert!(matches!(definition, FlagDefinition::PerEnvironment(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagDefinition {
    Static(bool),
    PerEnvironment(HashMap<String, bool>),
}

impl From<FlagDefinition> for Detector {
    fn from(definition: FlagDefinition) -> Self {
        match definition {
            FlagDefinition::Static(enabled) => Detector::Static(enabled),
            FlagDefinition::PerEnvironment(environments) => Detector::PerEnvironment(
                environments
                    .into_iter()
                    .map(|(environment, enabled)| (environment, EnvDetector::from(enabled)))
                    .collect(),
            ),
        }
    }
}

impl FeatureRegistry {
    /// Register every definition in a parsed configuration map
    pub fn register_definitions(&self, definitions: HashMap<String, FlagDefinition>) {
        for (name, definition) in definitions {
            self.register(name, Detector::from(definition));
        }
    }

    /// Register definitions from raw configuration data
    ///
    /// Expects a JSON object of feature name to definition, e.g.
    /// `{"new_ui": true, "dark_mode": {"production": true, "staging": false}}`.
    pub fn load_definitions(&self, value: serde_json::Value) -> Result<()> {
        let definitions: HashMap<String, FlagDefinition> = serde_json::from_value(value)
            .map_err(|err| FeatureError::InvalidDefinition(err.to_string()))?;
        self.register_definitions(definitions);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_bool_parses_as_static() {
        let definition: FlagDefinition = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(definition, FlagDefinition::Static(true));
    }

    #[test]
    fn test_env_map_parses_as_per_environment() {
        let definition: FlagDefinition =
            serde_json::from_value(json!({"production": true, "staging": false})).unwrap();
        match &definition {
            FlagDefinition::PerEnvironment(environments) => {
                assert_eq!(environments.get("production"), Some(&true));
                assert_eq!(environments.get("staging"), Some(&false));
            }
            other => panic!("expected per-environment definition, got {:?}", other),
        }
    }

    #[test]
    fn test_definition_converts_to_detector() {
        let detector: Detector = FlagDefinition::Static(false).into();
        assert!(matches!(detector, Detector::Static(false)));

        let mut environments = HashMap::new();
        environments.insert("production".to_string(), true);
        let detector: Detector = FlagDefinition::PerEnvironment(environments).into();
        match detector {
            Detector::PerEnvironment(map) => assert!(map.contains("production")),
            other => panic!("expected per-environment detector, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_serialization() {
        let definition = FlagDefinition::Static(true);
        let serialized = serde_json::to_value(&definition).unwrap();
        assert_eq!(serialized, json!(true));
    }
}
