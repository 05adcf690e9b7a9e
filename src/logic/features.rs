//! Match Features
//!
//! The eight numeric statistics describing a match, the raw form state
//! they are typed into, and the validated payload sent to the service.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Number of features in a prediction request
pub const FEATURE_COUNT: usize = 8;

/// One named match statistic.
///
/// Variant order is form order and serialized key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Kills,
    TotalMinionKills,
    Assist,
    BaronKills,
    TowerKills,
    DragonKills,
    GameDuration,
    Death,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Kills,
        Feature::TotalMinionKills,
        Feature::Assist,
        Feature::BaronKills,
        Feature::TowerKills,
        Feature::DragonKills,
        Feature::GameDuration,
        Feature::Death,
    ];

    /// Wire name of the field
    pub fn name(self) -> &'static str {
        match self {
            Feature::Kills => "kills",
            Feature::TotalMinionKills => "total_minion_kills",
            Feature::Assist => "assist",
            Feature::BaronKills => "baron_kills",
            Feature::TowerKills => "tower_kills",
            Feature::DragonKills => "dragon_kills",
            Feature::GameDuration => "game_duration",
            Feature::Death => "death",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw value of a single form field, before coercion
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => f.write_str(s),
            RawValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Form state: field → raw input.
///
/// A field that was never set is reported as missing by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInput {
    values: BTreeMap<Feature, RawValue>,
}

impl Default for RawInput {
    /// Every field starts at 0, which passes every default bound.
    fn default() -> Self {
        Self {
            values: Feature::ALL
                .into_iter()
                .map(|f| (f, RawValue::Number(0.0)))
                .collect(),
        }
    }
}

impl RawInput {
    pub fn set(&mut self, feature: Feature, value: impl Into<RawValue>) {
        self.values.insert(feature, value.into());
    }

    /// Builder form of [`RawInput::set`]
    pub fn with(mut self, feature: Feature, value: impl Into<RawValue>) -> Self {
        self.set(feature, value);
        self
    }

    pub fn get(&self, feature: Feature) -> Option<&RawValue> {
        self.values.get(&feature)
    }

    pub fn remove(&mut self, feature: Feature) -> Option<RawValue> {
        self.values.remove(&feature)
    }
}

/// Validated feature set. Only the schema constructs one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureInput {
    #[serde(serialize_with = "whole_number")]
    pub kills: f64,
    #[serde(serialize_with = "whole_number")]
    pub total_minion_kills: f64,
    #[serde(serialize_with = "whole_number")]
    pub assist: f64,
    #[serde(serialize_with = "whole_number")]
    pub baron_kills: f64,
    #[serde(serialize_with = "whole_number")]
    pub tower_kills: f64,
    #[serde(serialize_with = "whole_number")]
    pub dragon_kills: f64,
    #[serde(serialize_with = "whole_number")]
    pub game_duration: f64,
    #[serde(serialize_with = "whole_number")]
    pub death: f64,
}

impl FeatureInput {
    /// Build from values in `Feature::ALL` order
    pub(crate) fn from_values(v: [f64; FEATURE_COUNT]) -> Self {
        Self {
            kills: v[0],
            total_minion_kills: v[1],
            assist: v[2],
            baron_kills: v[3],
            tower_kills: v[4],
            dragon_kills: v[5],
            game_duration: v[6],
            death: v[7],
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Kills => self.kills,
            Feature::TotalMinionKills => self.total_minion_kills,
            Feature::Assist => self.assist,
            Feature::BaronKills => self.baron_kills,
            Feature::TowerKills => self.tower_kills,
            Feature::DragonKills => self.dragon_kills,
            Feature::GameDuration => self.game_duration,
            Feature::Death => self.death,
        }
    }
}

/// The service declares integer fields, so whole numbers go out as JSON integers.
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Body of `POST /api/predict`. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PredictionRequest {
    features: FeatureInput,
}

impl PredictionRequest {
    pub fn new(features: FeatureInput) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &FeatureInput {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names_are_unique() {
        let names: std::collections::HashSet<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_default_form_is_all_zero() {
        let input = RawInput::default();
        for feature in Feature::ALL {
            assert_eq!(input.get(feature), Some(&RawValue::Number(0.0)));
        }
    }

    #[test]
    fn test_request_serializes_flat_in_field_order() {
        let features = FeatureInput::from_values([5.0, 180.0, 7.0, 1.0, 6.0, 2.0, 1850.0, 3.0]);
        let json = serde_json::to_string(&PredictionRequest::new(features)).unwrap();

        assert_eq!(
            json,
            r#"{"kills":5,"total_minion_kills":180,"assist":7,"baron_kills":1,"tower_kills":6,"dragon_kills":2,"game_duration":1850,"death":3}"#
        );
    }

    #[test]
    fn test_fractional_values_stay_floats() {
        let features = FeatureInput::from_values([2.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let value = serde_json::to_value(PredictionRequest::new(features)).unwrap();

        assert_eq!(value["kills"], serde_json::json!(2.5));
        assert_eq!(value["death"], serde_json::json!(0));
    }
}
