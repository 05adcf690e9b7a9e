//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default prediction service, only edit this file.

/// Default Prediction Service URL
///
/// This is the fallback URL when no environment variable is set.
/// For development: http://localhost:8000
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Prediction endpoint path (POST)
pub const PREDICT_PATH: &str = "/api/predict";

/// Service info endpoint path (GET)
pub const INFO_PATH: &str = "/api";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Match Predictor";

// ============================================
// Environment keys
// ============================================

pub const ENV_SERVICE_URL: &str = "PREDICT_SERVICE_URL";
pub const ENV_TIMEOUT_SECS: &str = "PREDICT_TIMEOUT_SECS";

/// Prefix for per-field lower bound overrides, e.g. `PREDICT_MIN_KILLS`
pub const ENV_MIN_PREFIX: &str = "PREDICT_MIN_";

/// Prefix for per-field upper bound overrides, e.g. `PREDICT_MAX_KILLS`
pub const ENV_MAX_PREFIX: &str = "PREDICT_MAX_";
