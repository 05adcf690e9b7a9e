//! Match Predictor
//!
//! Collects in-game statistics for a match, validates them against a
//! declarative rule table, submits them to a remote prediction service and
//! renders the predicted win/loss with its probability.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   RawInput    ┌───────────────┐   POST /api/predict   ┌────────────┐
//! │  Terminal UI │ ────────────▶ │  Submission   │ ────────────────────▶ │ Prediction │
//! │  (api/)      │ ◀──────────── │  Controller   │ ◀──────────────────── │  Service   │
//! └──────────────┘ SubmitOutcome └───────┬───────┘   PredictionResult    └────────────┘
//!                                        │ validate
//!                                ┌───────▼───────┐
//!                                │ FeatureSchema │
//!                                └───────────────┘
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::Config;
pub use error::{ConfigError, ErrorKind, FieldError, SubmitError, ValidationErrors};
