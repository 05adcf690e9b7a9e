//! Configuration module

use std::env;
use std::time::Duration;

use crate::constants;
use crate::error::ConfigError;
use crate::logic::client::ServiceConfig;
use crate::logic::features::Feature;
use crate::logic::schema::FeatureSchema;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Prediction service base URL
    pub service_url: String,

    /// Request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,

    /// Field bounds policy
    pub schema: FeatureSchema,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: constants::DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: None,
            schema: FeatureSchema::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let service_url = lookup(constants::ENV_SERVICE_URL)
            .unwrap_or_else(|| constants::DEFAULT_SERVICE_URL.to_string());

        let timeout_secs = lookup(constants::ENV_TIMEOUT_SECS)
            .map(|v| parse(constants::ENV_TIMEOUT_SECS, &v))
            .transpose()?;

        let mut schema = FeatureSchema::default();
        for feature in Feature::ALL {
            let rule = schema.rule(feature);
            let suffix = feature.name().to_uppercase();

            let min_key = format!("{}{}", constants::ENV_MIN_PREFIX, suffix);
            let max_key = format!("{}{}", constants::ENV_MAX_PREFIX, suffix);

            let min = match lookup(&min_key) {
                Some(v) => parse(&min_key, &v)?,
                None => rule.min,
            };
            let max = match lookup(&max_key) {
                Some(v) => parse(&max_key, &v)?,
                None => rule.max,
            };

            if min != rule.min || max != rule.max {
                log::debug!("Bounds override for {}: [{}, {}]", feature, min, max);
                schema = schema.with_bounds(feature, min, max)?;
            }
        }

        Ok(Self { service_url, timeout_secs, schema })
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.service_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.service_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.schema, FeatureSchema::default());
        assert!(config.service_config().timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PREDICT_SERVICE_URL", "http://predictor:9000"),
            ("PREDICT_TIMEOUT_SECS", "15"),
            ("PREDICT_MAX_KILLS", "150"),
            ("PREDICT_MAX_GAME_DURATION", "5400"),
        ]))
        .unwrap();

        assert_eq!(config.service_url, "http://predictor:9000");
        assert_eq!(config.service_config().timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.schema.rule(Feature::Kills).max, 150.0);
        assert_eq!(config.schema.rule(Feature::GameDuration).max, 5400.0);
        assert_eq!(config.schema.rule(Feature::Death).max, 110.0);
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PREDICT_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("PREDICT_MAX_BARON_KILLS", "six")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("PREDICT_MIN_DEATH", "200")])),
            Err(ConfigError::InvalidBounds { .. })
        ));
    }
}
