//! Terminal rendering of core state

use serde::Serialize;

use crate::error::{SubmitError, ValidationErrors};
use crate::logic::client::ServiceInfo;
use crate::logic::result::{submit_label, PredictionCard};
use crate::logic::schema::FeatureSchema;

/// Result card: outcome title and probability line
pub fn render_card(card: &PredictionCard) -> String {
    format!("{}\n{}", card.outcome.title(), card.summary)
}

/// One line per invalid field, labelled the way the form labels it
pub fn render_field_errors(schema: &FeatureSchema, errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|e| format!("  ✗ {}: {}", schema.rule(e.feature()).label, e))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_submit_error(error: &SubmitError) -> String {
    format!("Prediction failed: {}", error)
}

/// `[Predict]` / `[Predicting...]`
pub fn render_submit_button(submitting: bool) -> String {
    format!("[{}]", submit_label(submitting))
}

pub fn render_service_info(info: &ServiceInfo) -> String {
    let mut out = format!("{} v{}", info.name, info.version);
    for (path, description) in &info.endpoints {
        out.push_str(&format!("\n  {:<12} {}", path, description));
    }
    out
}

pub fn render_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
