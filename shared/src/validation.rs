//! Validation of tabular prediction requests
//!
//! Every measurement is bounded (inclusive). An absent measurement is not an
//! error: it reaches the model as 0.0. The bounds are exposed as constants so the API documentation and the browser form use the
//! same numbers as the server.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{internal_name, FeatureMap, FeatureVector};

// ============================================================================
// Field bounds
// ============================================================================

pub const WIND_SPEED_MIN: f64 = 0.0;
pub const WIND_SPEED_MAX: f64 = 200.0;
pub const PRECIPITATION_MIN: f64 = 0.0;
pub const PRECIPITATION_MAX: f64 = 100.0;
pub const TEMPERATURE_MIN: f64 = -50.0;
pub const TEMPERATURE_MAX: f64 = 60.0;
pub const HUMIDITY_MIN: f64 = 0.0;
pub const HUMIDITY_MAX: f64 = 100.0;
pub const PRESSURE_MIN: f64 = 800.0;
pub const PRESSURE_MAX: f64 = 1100.0;
pub const CLOUD_COVER_MIN: f64 = 0.0;
pub const CLOUD_COVER_MAX: f64 = 100.0;
pub const VISIBILITY_MIN: f64 = 0.0;
pub const VISIBILITY_MAX: f64 = 50.0;
pub const DEW_POINT_MIN: f64 = -30.0;
pub const DEW_POINT_MAX: f64 = 30.0;
pub const UV_INDEX_MIN: f64 = 0.0;
pub const UV_INDEX_MAX: f64 = 12.0;

/// Allowed solar radiation levels (0: low, 1: moderate, 2: high)
pub const SOLAR_RADIATION_LEVELS: [(u8, &str); 3] = [(0, "Faible"), (1, "Modéré"), (2, "Élevé")];

/// Accepted values for one API field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldConstraint {
    Range { min: f64, max: f64, unit: &'static str },
    Choice(&'static [(u8, &'static str)]),
}

/// API field name and its constraint, in feature order
pub const FIELD_CONSTRAINTS: [(&str, FieldConstraint); 10] = [
    ("wind_speed", FieldConstraint::Range { min: WIND_SPEED_MIN, max: WIND_SPEED_MAX, unit: "km/h" }),
    ("precipitation", FieldConstraint::Range { min: PRECIPITATION_MIN, max: PRECIPITATION_MAX, unit: "%" }),
    ("temperature", FieldConstraint::Range { min: TEMPERATURE_MIN, max: TEMPERATURE_MAX, unit: "°C" }),
    ("humidity", FieldConstraint::Range { min: HUMIDITY_MIN, max: HUMIDITY_MAX, unit: "%" }),
    ("pressure", FieldConstraint::Range { min: PRESSURE_MIN, max: PRESSURE_MAX, unit: "hPa" }),
    ("solar_radiation", FieldConstraint::Choice(&SOLAR_RADIATION_LEVELS)),
    ("cloud_cover", FieldConstraint::Range { min: CLOUD_COVER_MIN, max: CLOUD_COVER_MAX, unit: "%" }),
    ("visibility", FieldConstraint::Range { min: VISIBILITY_MIN, max: VISIBILITY_MAX, unit: "km" }),
    ("dew_point", FieldConstraint::Range { min: DEW_POINT_MIN, max: DEW_POINT_MAX, unit: "°C" }),
    ("uv_index", FieldConstraint::Range { min: UV_INDEX_MIN, max: UV_INDEX_MAX, unit: "" }),
];

impl FieldConstraint {
    /// Human-readable description used by the API docs
    pub fn describe(&self) -> String {
        match self {
            FieldConstraint::Range { min, max, unit } if unit.is_empty() => {
                format!("float ({}-{})", min, max)
            }
            FieldConstraint::Range { min, max, unit } => format!("float ({}-{} {})", min, max, unit),
            FieldConstraint::Choice(levels) => {
                let choices: Vec<String> = levels
                    .iter()
                    .map(|(value, name)| format!("{}:{}", value, name))
                    .collect();
                format!("int ({})", choices.join(", "))
            }
        }
    }
}

// ============================================================================
// Request payload
// ============================================================================

/// Tabular prediction request, keyed by API field names
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct TabularInput {
    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(range(min = "WIND_SPEED_MIN", max = "WIND_SPEED_MAX"))]
    pub wind_speed: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(range(min = "PRECIPITATION_MIN", max = "PRECIPITATION_MAX"))]
    pub precipitation: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(range(min = "TEMPERATURE_MIN", max = "TEMPERATURE_MAX"))]
    pub temperature: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(range(min = "HUMIDITY_MIN", max = "HUMIDITY_MAX"))]
    pub humidity: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(range(min = "PRESSURE_MIN", max = "PRESSURE_MAX"))]
    pub pressure: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(custom = "validate_solar_radiation")]
    pub solar_radiation: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(range(min = "CLOUD_COVER_MIN", max = "CLOUD_COVER_MAX"))]
    pub cloud_cover: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(range(min = "VISIBILITY_MIN", max = "VISIBILITY_MAX"))]
    pub visibility: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(range(min = "DEW_POINT_MIN", max = "DEW_POINT_MAX"))]
    pub dew_point: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[validate(range(min = "UV_INDEX_MIN", max = "UV_INDEX_MAX"))]
    pub uv_index: Option<f64>,
}

impl TabularInput {
    fn fields(&self) -> [(&'static str, Option<f64>); 10] {
        [
            ("wind_speed", self.wind_speed),
            ("precipitation", self.precipitation),
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("pressure", self.pressure),
            ("solar_radiation", self.solar_radiation),
            ("cloud_cover", self.cloud_cover),
            ("visibility", self.visibility),
            ("dew_point", self.dew_point),
            ("uv_index", self.uv_index),
        ]
    }

    /// Rename present fields to internal feature names
    pub fn to_features(&self) -> FeatureMap {
        self.fields()
            .into_iter()
            .filter_map(|(field, value)| Some((internal_name(field)?.to_string(), value?)))
            .collect()
    }

    /// Ordered vector for the tabular model; absent fields become 0.0
    pub fn to_feature_vector(&self) -> FeatureVector {
        FeatureVector::from_features(&self.to_features())
    }

    /// Validate and return field-level messages on failure
    pub fn check(&self) -> Result<(), BTreeMap<String, Vec<String>>> {
        self.validate().map_err(|errors| field_messages(&errors))
    }
}

fn validate_solar_radiation(value: f64) -> Result<(), ValidationError> {
    if SOLAR_RADIATION_LEVELS
        .iter()
        .any(|(level, _)| f64::from(*level) == value)
    {
        return Ok(());
    }
    let mut err = ValidationError::new("invalid_choice");
    err.message = Some(format!("\"{}\" n'est pas un choix valide.", value).into());
    Err(err)
}

/// Accept JSON numbers or numeric strings; reject non-finite values
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(NumberOrText::Number(v)) => v,
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("\"{}\" n'est pas un nombre valide.", s)))?,
    };

    if !value.is_finite() {
        return Err(de::Error::custom("Un nombre fini est requis."));
    }
    Ok(Some(value))
}

/// Flatten `validator` errors into field → messages
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs.iter().map(describe_error).collect();
            (field.to_string(), messages)
        })
        .collect()
}

fn describe_error(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "range" => {
            let min = error.params.get("min").map(|v| v.to_string()).unwrap_or_default();
            let max = error.params.get("max").map(|v| v.to_string()).unwrap_or_default();
            format!("Assurez-vous que cette valeur est comprise entre {} et {}.", min, max)
        }
        code => format!("Valeur invalide ({}).", code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_input() -> TabularInput {
        TabularInput {
            wind_speed: Some(10.0),
            precipitation: Some(50.0),
            temperature: Some(25.0),
            humidity: Some(70.0),
            pressure: Some(1013.0),
            solar_radiation: Some(1.0),
            cloud_cover: Some(50.0),
            visibility: Some(10.0),
            dew_point: Some(10.0),
            uv_index: Some(5.0),
        }
    }

    fn set(input: &mut TabularInput, field: &str, value: Option<f64>) {
        match field {
            "wind_speed" => input.wind_speed = value,
            "precipitation" => input.precipitation = value,
            "temperature" => input.temperature = value,
            "humidity" => input.humidity = value,
            "pressure" => input.pressure = value,
            "solar_radiation" => input.solar_radiation = value,
            "cloud_cover" => input.cloud_cover = value,
            "visibility" => input.visibility = value,
            "dew_point" => input.dew_point = value,
            "uv_index" => input.uv_index = value,
            other => panic!("unknown field {}", other),
        }
    }

    fn bounds(constraint: &FieldConstraint) -> (f64, f64) {
        match constraint {
            FieldConstraint::Range { min, max, .. } => (*min, *max),
            FieldConstraint::Choice(levels) => (
                f64::from(levels[0].0),
                f64::from(levels[levels.len() - 1].0),
            ),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().check().is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        for (field, constraint) in FIELD_CONSTRAINTS.iter() {
            let (min, max) = bounds(constraint);
            for value in [min, max] {
                let mut input = valid_input();
                set(&mut input, field, Some(value));
                assert!(input.check().is_ok(), "{} = {} should pass", field, value);
            }
        }
    }

    #[test]
    fn test_one_unit_outside_bounds_fails() {
        for (field, constraint) in FIELD_CONSTRAINTS.iter() {
            let (min, max) = bounds(constraint);
            for value in [min - 1.0, max + 1.0] {
                let mut input = valid_input();
                set(&mut input, field, Some(value));
                let details = input.check().unwrap_err();
                assert_eq!(details.len(), 1);
                assert!(details.contains_key(*field), "{} = {} should fail", field, value);
            }
        }
    }

    #[test]
    fn test_missing_fields_are_accepted() {
        let mut input = valid_input();
        input.humidity = None;
        input.solar_radiation = None;
        assert!(input.check().is_ok());
        assert!(TabularInput::default().check().is_ok());
    }

    #[test]
    fn test_partial_payload_defaults_to_zero() {
        let mut payload: serde_json::Map<String, serde_json::Value> = FIELD_CONSTRAINTS
            .iter()
            .map(|(field, _)| (field.to_string(), serde_json::json!(1)))
            .collect();
        payload.remove("humidity");

        let input: TabularInput =
            serde_json::from_value(serde_json::Value::Object(payload)).unwrap();
        assert!(input.check().is_ok());
        assert_eq!(input.to_feature_vector().values()[3], 0.0);
        assert!(!input.to_features().contains_key("Humidity"));
    }

    #[test]
    fn test_solar_radiation_accepts_integral_floats() {
        let input: TabularInput =
            serde_json::from_str(r#"{"solar_radiation": "1.0"}"#).unwrap();
        assert!(input.check().is_ok());

        let input: TabularInput = serde_json::from_str(r#"{"solar_radiation": 2.0}"#).unwrap();
        assert!(input.check().is_ok());
    }

    #[test]
    fn test_solar_radiation_rejects_fractions() {
        let mut input = valid_input();
        input.solar_radiation = Some(1.5);
        let details = input.check().unwrap_err();
        assert_eq!(details["solar_radiation"], vec!["\"1.5\" n'est pas un choix valide."]);
    }

    #[test]
    fn test_range_message() {
        let mut input = valid_input();
        input.pressure = Some(1200.0);
        let details = input.check().unwrap_err();
        assert_eq!(
            details["pressure"],
            vec!["Assurez-vous que cette valeur est comprise entre 800.0 et 1100.0."]
        );
    }

    #[test]
    fn test_features_use_internal_names() {
        let features = valid_input().to_features();
        assert_eq!(features.len(), 10);
        assert_eq!(features["Wind Speed"], 10.0);
        assert_eq!(features["Precipitation (%)"], 50.0);
        assert_eq!(features["Solar Radiation"], 1.0);
        assert_eq!(features["UV Index"], 5.0);
    }

    #[test]
    fn test_feature_vector_defaults_missing_to_zero() {
        let mut input = valid_input();
        input.pressure = None;
        let vector = input.to_feature_vector();
        assert_eq!(
            vector.values(),
            &[10.0, 50.0, 25.0, 70.0, 0.0, 1.0, 50.0, 10.0, 10.0, 5.0]
        );
    }

    #[test]
    fn test_deserialize_numeric_strings() {
        let input: TabularInput = serde_json::from_str(
            r#"{"wind_speed": "12.5", "precipitation": 3, "solar_radiation": "2"}"#,
        )
        .unwrap();
        assert_eq!(input.wind_speed, Some(12.5));
        assert_eq!(input.precipitation, Some(3.0));
        assert_eq!(input.solar_radiation, Some(2.0));
        assert_eq!(input.temperature, None);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<TabularInput>(r#"{"wind_speed": "fast"}"#).is_err());
        assert!(serde_json::from_str::<TabularInput>(r#"{"wind_speed": "NaN"}"#).is_err());
        assert!(serde_json::from_str::<TabularInput>(r#"{"wind_speed": true}"#).is_err());
    }

    #[test]
    fn test_null_is_missing() {
        let input: TabularInput = serde_json::from_str(r#"{"uv_index": null}"#).unwrap();
        assert_eq!(input.uv_index, None);
    }

    #[test]
    fn test_describe_constraints() {
        assert_eq!(FIELD_CONSTRAINTS[0].1.describe(), "float (0-200 km/h)");
        assert_eq!(FIELD_CONSTRAINTS[2].1.describe(), "float (-50-60 °C)");
        assert_eq!(FIELD_CONSTRAINTS[9].1.describe(), "float (0-12)");
        assert_eq!(
            FIELD_CONSTRAINTS[5].1.describe(),
            "int (0:Faible, 1:Modéré, 2:Élevé)"
        );
    }

    proptest! {
        #[test]
        fn prop_in_range_values_accepted(
            wind in WIND_SPEED_MIN..=WIND_SPEED_MAX,
            precipitation in PRECIPITATION_MIN..=PRECIPITATION_MAX,
            temperature in TEMPERATURE_MIN..=TEMPERATURE_MAX,
            humidity in HUMIDITY_MIN..=HUMIDITY_MAX,
            pressure in PRESSURE_MIN..=PRESSURE_MAX,
            solar in 0u8..=2,
            cloud in CLOUD_COVER_MIN..=CLOUD_COVER_MAX,
            visibility in VISIBILITY_MIN..=VISIBILITY_MAX,
            dew in DEW_POINT_MIN..=DEW_POINT_MAX,
            uv in UV_INDEX_MIN..=UV_INDEX_MAX,
        ) {
            let input = TabularInput {
                wind_speed: Some(wind),
                precipitation: Some(precipitation),
                temperature: Some(temperature),
                humidity: Some(humidity),
                pressure: Some(pressure),
                solar_radiation: Some(f64::from(solar)),
                cloud_cover: Some(cloud),
                visibility: Some(visibility),
                dew_point: Some(dew),
                uv_index: Some(uv),
            };
            prop_assert!(input.check().is_ok());

            let vector = input.to_feature_vector();
            prop_assert_eq!(vector.values()[0], wind);
            prop_assert_eq!(vector.values()[9], uv);
        }

        #[test]
        fn prop_temperature_above_max_rejected(excess in 0.001f64..1000.0) {
            let mut input = valid_input();
            input.temperature = Some(TEMPERATURE_MAX + excess);
            let details = input.check().unwrap_err();
            prop_assert!(details.contains_key("temperature"));
        }
    }
}
