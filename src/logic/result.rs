//! Prediction Result & Presentation Contract
//!
//! `probability` is always the service's probability of a win. The view
//! re-expresses it as the probability of the stated outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::controller::SubmitOutcome;

/// Prediction record returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub win: bool,
    pub probability: f64,
    /// Raw model output, not interpreted
    pub prediction: f64,
}

/// Predicted outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn title(self) -> &'static str {
        match self {
            Outcome::Win => "Wins",
            Outcome::Loss => "Losses",
        }
    }

    pub fn probability_label(self) -> &'static str {
        match self {
            Outcome::Win => "Winning probability",
            Outcome::Loss => "Losing probability",
        }
    }
}

impl PredictionResult {
    /// Shape check beyond field types: probability must be finite and in [0, 1]
    pub fn validate(&self) -> Result<(), String> {
        if !(self.probability.is_finite() && (0.0..=1.0).contains(&self.probability)) {
            return Err(format!("probability out of range: {}", self.probability));
        }
        if !self.prediction.is_finite() {
            return Err("prediction is not a finite number".to_string());
        }
        Ok(())
    }

    pub fn outcome(&self) -> Outcome {
        if self.win {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    /// Probability of the stated outcome, as a rounded percentage
    pub fn outcome_percent(&self) -> u32 {
        let p = match self.outcome() {
            Outcome::Win => self.probability,
            Outcome::Loss => 1.0 - self.probability,
        };
        round_half_up(p * 100.0) as u32
    }

    /// e.g. "Winning probability: 73%"
    pub fn summary(&self) -> String {
        format!(
            "{}: {}%",
            self.outcome().probability_label(),
            self.outcome_percent()
        )
    }
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// A result as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionCard {
    pub result: PredictionResult,
    pub outcome: Outcome,
    pub percent: u32,
    pub summary: String,
    pub received_at: DateTime<Utc>,
}

impl PredictionCard {
    pub fn new(result: PredictionResult) -> Self {
        Self {
            outcome: result.outcome(),
            percent: result.outcome_percent(),
            summary: result.summary(),
            received_at: Utc::now(),
            result,
        }
    }
}

/// The single result slot owned by the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ResultView {
    current: Option<PredictionCard>,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means no result yet
    pub fn current(&self) -> Option<&PredictionCard> {
        self.current.as_ref()
    }

    /// Apply a submission outcome. Only a success replaces the slot;
    /// anything else leaves the shown result untouched.
    ///
    /// Returns true when the slot changed.
    pub fn apply(&mut self, outcome: &SubmitOutcome) -> bool {
        match outcome {
            SubmitOutcome::Succeeded(result) => {
                self.current = Some(PredictionCard::new(result.clone()));
                true
            }
            _ => false,
        }
    }
}

/// Submit button text
pub fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        "Predicting..."
    } else {
        "Predict"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitError;

    fn result(win: bool, probability: f64) -> PredictionResult {
        PredictionResult {
            win,
            probability,
            prediction: if win { 1.0 } else { 0.0 },
        }
    }

    #[test]
    fn test_win_summary() {
        assert_eq!(result(true, 0.73).summary(), "Winning probability: 73%");
        assert_eq!(result(true, 0.73).outcome().title(), "Wins");
    }

    #[test]
    fn test_loss_uses_complement() {
        let r = result(false, 0.2);
        assert_eq!(r.outcome_percent(), 80);
        assert_eq!(r.summary(), "Losing probability: 80%");
        assert_eq!(r.outcome().title(), "Losses");
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(result(true, 0.505).outcome_percent(), 51);
        assert_eq!(result(true, 0.994).outcome_percent(), 99);
        assert_eq!(result(true, 1.0).outcome_percent(), 100);
        assert_eq!(result(false, 1.0).outcome_percent(), 0);
    }

    #[test]
    fn test_validate_probability_range() {
        assert!(result(true, 0.5).validate().is_ok());
        assert!(result(true, 1.5).validate().is_err());
        assert!(result(false, -0.1).validate().is_err());
        assert!(result(false, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_deserialize_service_response() {
        let r: PredictionResult =
            serde_json::from_str(r#"{"prediction": 1, "probability": 0.73, "win": true}"#).unwrap();
        assert_eq!(r, result(true, 0.73));
    }

    #[test]
    fn test_view_transitions() {
        let mut view = ResultView::new();
        assert!(view.current().is_none());

        assert!(view.apply(&SubmitOutcome::Succeeded(result(true, 0.73))));
        assert_eq!(view.current().map(|c| c.percent), Some(73));

        // Failure keeps the shown result
        let failed = SubmitOutcome::Failed(SubmitError::Network("connection refused".into()));
        assert!(!view.apply(&failed));
        assert_eq!(view.current().map(|c| c.summary.as_str()), Some("Winning probability: 73%"));

        // Next success replaces it wholesale
        assert!(view.apply(&SubmitOutcome::Succeeded(result(false, 0.2))));
        let card = view.current().unwrap();
        assert_eq!(card.outcome, Outcome::Loss);
        assert_eq!(card.summary, "Losing probability: 80%");
    }

    #[test]
    fn test_submit_label() {
        assert_eq!(submit_label(false), "Predict");
        assert_eq!(submit_label(true), "Predicting...");
    }
}
