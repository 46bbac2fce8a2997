//! Deep merge for layered YAML configuration.
//!
//! `.stackpulse/config.local.yml` is merged over `.stackpulse/config.yml`.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences are replaced entirely (a local `packages:` list replaces the
//!   shared one)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::Value;

/// Deep merge two YAML values.
///
/// Later values override earlier values at the point of conflict.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        // An empty file parses to Null; treat it as "no changes".
        (base, Value::Null) => base.clone(),

        (_, overlay) => overlay.clone(),
    }
}

/// Merge multiple configs in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}
