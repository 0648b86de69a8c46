use std::path::Path;

use serde::{Deserialize, Serialize};
use tw_core::{EntityId, EntitySpec};
use tw_simulation::SimConfig;

/// A scenario file: simulation settings plus the entities to spawn.
///
/// Entities are spawned in file order, so the N-th entry gets ID `N` and
/// later entries can follow earlier ones by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SimConfig,
    pub entities: Vec<EntitySpec>,
}

impl Scenario {
    /// Two circles heading for each other's start, and a third chasing the first.
    pub fn demo() -> Self {
        Self {
            config: SimConfig::default(),
            entities: vec![
                EntitySpec::at(0.0, 0.0).circle(5.0).toward(10.0, 10.0),
                EntitySpec::at(10.0, 10.0).circle(5.0).toward(0.0, 0.0),
                EntitySpec::at(-10.0, -20.0).circle(5.0).following(EntityId(0)),
            ],
        }
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        serde_json::from_str(&text).map_err(|e| format!("invalid scenario {}: {e}", path.display()))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("JSON serialization error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_round_trips_through_json() {
        let demo = Scenario::demo();
        let json = demo.to_json().unwrap();
        let back: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(back, demo);
    }

    #[test]
    fn config_is_optional() {
        let scenario: Scenario =
            serde_json::from_str(r#"{"entities":[{"position":[0.0,0.0]}]}"#).unwrap();
        assert_eq!(scenario.config, SimConfig::default());
        assert_eq!(scenario.entities.len(), 1);
    }
}
