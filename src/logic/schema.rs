//! Feature Schema & Validator
//!
//! Declarative rule table (field → label, bounds, message template)
//! interpreted by a single generic check routine.

use crate::error::{ConfigError, FieldError, RangeViolation, ValidationErrors};
use super::features::{Feature, FeatureInput, RawInput, RawValue, FEATURE_COUNT};

/// Validation rule for one feature. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRule {
    pub feature: Feature,
    /// Form label
    pub label: &'static str,
    /// Subject used in error messages
    pub noun: &'static str,
    pub min: f64,
    pub max: f64,
    /// Appended to the upper-bound message
    pub unit: Option<&'static str>,
}

const fn rule(
    feature: Feature,
    label: &'static str,
    noun: &'static str,
    max: f64,
    unit: Option<&'static str>,
) -> FeatureRule {
    FeatureRule { feature, label, noun, min: 0.0, max, unit }
}

/// Default sanity bounds, in form order
pub const DEFAULT_RULES: [FeatureRule; FEATURE_COUNT] = [
    rule(Feature::Kills, "Kills", "Kills", 100.0, None),
    rule(Feature::TotalMinionKills, "Total Minion Kills", "Total minion kills", 1500.0, None),
    rule(Feature::Assist, "Assists", "Assists", 300.0, None),
    rule(Feature::BaronKills, "Baron Kills", "Baron kills", 6.0, None),
    rule(Feature::TowerKills, "Tower Kills", "Tower kills", 14.0, None),
    rule(Feature::DragonKills, "Dragon Kills", "Dragon kills", 10.0, None),
    rule(Feature::GameDuration, "Game Duration (seconds)", "Game duration", 3600.0, Some("seconds")),
    rule(Feature::Death, "Deaths", "Deaths", 110.0, None),
];

impl FeatureRule {
    /// Coerce and range-check one raw value
    pub fn check(&self, raw: Option<&RawValue>) -> Result<f64, FieldError> {
        let value = raw.and_then(coerce).ok_or_else(|| FieldError::NotANumber {
            feature: self.feature,
            message: format!("{} must be a number", self.label),
        })?;

        if value < self.min {
            return Err(FieldError::OutOfRange {
                feature: self.feature,
                violation: RangeViolation::BelowMinimum,
                message: format!("{} must be greater than {}", self.noun, self.min),
            });
        }

        if value > self.max {
            let message = match self.unit {
                Some(unit) => format!("{} must be less than {} {}", self.noun, self.max, unit),
                None => format!("{} must be less than {}", self.noun, self.max),
            };
            return Err(FieldError::OutOfRange {
                feature: self.feature,
                violation: RangeViolation::AboveMaximum,
                message,
            });
        }

        Ok(value)
    }
}

/// Text → number. Blank, non-numeric and non-finite input all fail.
fn coerce(raw: &RawValue) -> Option<f64> {
    let value = match raw {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
    };
    value.is_finite().then_some(value)
}

/// The full rule table
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    rules: [FeatureRule; FEATURE_COUNT],
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self { rules: DEFAULT_RULES }
    }
}

impl FeatureSchema {
    /// Replace the bounds of one feature
    pub fn with_bounds(mut self, feature: Feature, min: f64, max: f64) -> Result<Self, ConfigError> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(ConfigError::InvalidBounds { feature, min, max });
        }
        let rule = &mut self.rules[index_of(feature)];
        rule.min = min;
        rule.max = max;
        Ok(self)
    }

    pub fn rule(&self, feature: Feature) -> &FeatureRule {
        &self.rules[index_of(feature)]
    }

    /// Rules in form order
    pub fn rules(&self) -> impl Iterator<Item = &FeatureRule> {
        self.rules.iter()
    }

    /// Validate a single field (live feedback while editing)
    pub fn check_field(&self, feature: Feature, raw: &RawValue) -> Result<f64, FieldError> {
        self.rule(feature).check(Some(raw))
    }

    /// Validate every field independently; all failures are reported.
    pub fn validate(&self, input: &RawInput) -> Result<FeatureInput, ValidationErrors> {
        let mut values = [0.0; FEATURE_COUNT];
        let mut errors = Vec::new();

        for (slot, rule) in values.iter_mut().zip(self.rules.iter()) {
            match rule.check(input.get(rule.feature)) {
                Ok(v) => *slot = v,
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(FeatureInput::from_values(values))
        } else {
            Err(ValidationErrors::new(errors))
        }
    }
}

fn index_of(feature: Feature) -> usize {
    Feature::ALL
        .iter()
        .position(|f| *f == feature)
        .unwrap_or_default()
}
