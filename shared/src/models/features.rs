//! Tabular feature names and the ordered feature vector

use std::collections::HashMap;

use serde::Serialize;

/// Number of features consumed by the tabular classifier
pub const FEATURE_COUNT: usize = 10;

/// Internal feature names in model training order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Wind Speed",
    "Precipitation (%)",
    "Temperature",
    "Humidity",
    "Pressure",
    "Solar Radiation",
    "Cloud Cover",
    "Visibility",
    "Dew Point",
    "UV Index",
];

/// API field name → internal feature name
pub const FIELD_MAPPING: [(&str, &str); FEATURE_COUNT] = [
    ("wind_speed", "Wind Speed"),
    ("precipitation", "Precipitation (%)"),
    ("temperature", "Temperature"),
    ("humidity", "Humidity"),
    ("pressure", "Pressure"),
    ("solar_radiation", "Solar Radiation"),
    ("cloud_cover", "Cloud Cover"),
    ("visibility", "Visibility"),
    ("dew_point", "Dew Point"),
    ("uv_index", "UV Index"),
];

/// Internal feature name for an API field name
pub fn internal_name(field: &str) -> Option<&'static str> {
    FIELD_MAPPING
        .iter()
        .find(|(external, _)| *external == field)
        .map(|(_, internal)| *internal)
}

/// API field name for an internal feature name
pub fn external_name(feature: &str) -> Option<&'static str> {
    FIELD_MAPPING
        .iter()
        .find(|(_, internal)| *internal == feature)
        .map(|(external, _)| *external)
}

/// Sparse mapping of internal feature names to values
pub type FeatureMap = HashMap<String, f64>;

/// Feature values in training order
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Order a sparse feature mapping; absent features are filled with 0.0
    pub fn from_features(features: &FeatureMap) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
            *slot = features.get(name).copied().unwrap_or(0.0);
        }
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Single-precision copy for the inference runtime
    pub fn to_f32(&self) -> [f32; FEATURE_COUNT] {
        self.0.map(|v| v as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mapping_matches_feature_order() {
        let internal: Vec<&str> = FIELD_MAPPING.iter().map(|(_, i)| *i).collect();
        assert_eq!(internal, FEATURE_NAMES.to_vec());
    }

    #[test]
    fn test_mapping_is_bijection() {
        let externals: HashSet<&str> = FIELD_MAPPING.iter().map(|(e, _)| *e).collect();
        let internals: HashSet<&str> = FIELD_MAPPING.iter().map(|(_, i)| *i).collect();
        assert_eq!(externals.len(), FEATURE_COUNT);
        assert_eq!(internals.len(), FEATURE_COUNT);

        let reconstructed: HashSet<&str> = externals
            .iter()
            .map(|e| internal_name(e).unwrap())
            .map(|i| external_name(i).unwrap())
            .collect();
        assert_eq!(reconstructed, externals);
    }

    #[test]
    fn test_specific_pairs() {
        assert_eq!(internal_name("wind_speed"), Some("Wind Speed"));
        assert_eq!(internal_name("precipitation"), Some("Precipitation (%)"));
        assert_eq!(internal_name("uv_index"), Some("UV Index"));
        assert_eq!(external_name("Dew Point"), Some("dew_point"));
        assert_eq!(internal_name("Wind Speed"), None);
    }

    #[test]
    fn test_missing_feature_defaults_to_zero() {
        let mut features = FeatureMap::new();
        for (i, name) in FEATURE_NAMES.iter().enumerate() {
            if *name != "Humidity" {
                features.insert(name.to_string(), (i + 1) as f64);
            }
        }

        let vector = FeatureVector::from_features(&features);
        assert_eq!(
            vector.values(),
            &[1.0, 2.0, 3.0, 0.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );
    }

    #[test]
    fn test_empty_map_is_all_zero() {
        let vector = FeatureVector::from_features(&FeatureMap::new());
        assert_eq!(vector.values(), &[0.0; FEATURE_COUNT]);
    }

    #[test]
    fn test_unknown_features_ignored() {
        let mut features = FeatureMap::new();
        features.insert("wind_speed".to_string(), 42.0);
        features.insert("Temperature".to_string(), 21.5);

        let vector = FeatureVector::from_features(&features);
        assert_eq!(vector.values()[0], 0.0);
        assert_eq!(vector.values()[2], 21.5);
    }
}
