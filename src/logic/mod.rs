//! Logic Module - Validation & Submission Pipeline
//!
//! - `features` - Match features, raw form state, request payload
//! - `schema` - Rule table and validator
//! - `client` - HTTP client for the prediction service
//! - `controller` - Submission state machine
//! - `result` - Prediction result and its presentation contract

pub mod features;
pub mod schema;
pub mod client;
pub mod controller;
pub mod result;

pub use client::{HttpPredictionClient, PredictionService, ServiceConfig, ServiceInfo};
pub use controller::{SubmissionController, SubmissionState, SubmitOutcome};
pub use features::{Feature, FeatureInput, PredictionRequest, RawInput, RawValue};
pub use result::{Outcome, PredictionCard, PredictionResult, ResultView};
pub use schema::{FeatureRule, FeatureSchema};
