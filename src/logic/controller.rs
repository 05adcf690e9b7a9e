//! Submission Controller
//!
//! Validates the form, runs one request at a time against the prediction
//! service, and hands the outcome back as a value for the view to apply.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::error::{SubmitError, ValidationErrors};
use super::client::PredictionService;
use super::features::{FeatureInput, PredictionRequest, RawInput};
use super::result::PredictionResult;
use super::schema::FeatureSchema;

/// Controller state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(PredictionResult),
    Failed(SubmitError),
}

/// What a single `submit` produced
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Field errors; no request was sent
    Invalid(ValidationErrors),
    /// Another submission is in flight; no request was sent
    Busy,
    Succeeded(PredictionResult),
    Failed(SubmitError),
    /// Completed after teardown or after a newer submission; not applied
    Discarded,
}

pub struct SubmissionController<S> {
    schema: FeatureSchema,
    service: S,
    state: RwLock<SubmissionState>,
    generation: AtomicU64,
    torn_down: AtomicBool,
}

impl<S: PredictionService> SubmissionController<S> {
    pub fn new(schema: FeatureSchema, service: S) -> Self {
        Self {
            schema,
            service,
            state: RwLock::new(SubmissionState::Idle),
            generation: AtomicU64::new(0),
            torn_down: AtomicBool::new(false),
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn state(&self) -> SubmissionState {
        self.state.read().clone()
    }

    /// Submit action must be disabled while this is true
    pub fn is_submitting(&self) -> bool {
        matches!(*self.state.read(), SubmissionState::Submitting)
    }

    /// The view is gone. Any in-flight completion is dropped.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
        log::debug!("Submission controller torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Whole-form validation, without touching state
    pub fn validate(&self, input: &RawInput) -> Result<FeatureInput, ValidationErrors> {
        self.schema.validate(input).inspect_err(|errors| {
            log::debug!("Validation failed: {}", errors);
        })
    }

    /// Validate, send, and record the outcome
    pub async fn submit(&self, input: &RawInput) -> SubmitOutcome {
        match self.validate(input) {
            Ok(features) => self.submit_features(features).await,
            Err(errors) => SubmitOutcome::Invalid(errors),
        }
    }

    /// Send an already validated feature set and record the outcome
    pub async fn submit_features(&self, features: FeatureInput) -> SubmitOutcome {
        let Some(in_flight) = self.begin() else {
            return if self.is_torn_down() {
                SubmitOutcome::Discarded
            } else {
                SubmitOutcome::Busy
            };
        };

        let response = self.send(features).await;
        in_flight.finish(response)
    }

    /// Enter `Submitting` and take a generation ticket
    fn begin(&self) -> Option<InFlight<'_, S>> {
        let mut state = self.state.write();
        if self.is_torn_down() || matches!(*state, SubmissionState::Submitting) {
            return None;
        }
        let previous = std::mem::replace(&mut *state, SubmissionState::Submitting);
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        Some(InFlight {
            controller: self,
            ticket,
            previous: Some(previous),
        })
    }

    async fn send(&self, features: FeatureInput) -> Result<PredictionResult, SubmitError> {
        let request = PredictionRequest::new(features);
        self.service.predict(&request).await
    }
}

/// A submission between `begin` and its completion.
///
/// Dropped without `finish` (the submit future was cancelled), it puts back
/// the state from before `begin` so the submit action is enabled again.
struct InFlight<'a, S> {
    controller: &'a SubmissionController<S>,
    ticket: u64,
    previous: Option<SubmissionState>,
}

impl<S> InFlight<'_, S> {
    fn is_current(&self) -> bool {
        self.controller.generation.load(Ordering::SeqCst) == self.ticket
    }

    /// Apply a completion only if it is still the latest and the view is alive
    fn finish(mut self, response: Result<PredictionResult, SubmitError>) -> SubmitOutcome {
        self.previous = None;
        let mut state = self.controller.state.write();

        if self.controller.torn_down.load(Ordering::SeqCst) || !self.is_current() {
            log::debug!("Discarding stale prediction response (ticket {})", self.ticket);
            return SubmitOutcome::Discarded;
        }

        match response {
            Ok(result) => {
                *state = SubmissionState::Succeeded(result.clone());
                SubmitOutcome::Succeeded(result)
            }
            Err(e) => {
                log::warn!("Submission failed: {}", e);
                *state = SubmissionState::Failed(e.clone());
                SubmitOutcome::Failed(e)
            }
        }
    }
}

impl<S> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        let Some(previous) = self.previous.take() else {
            return;
        };

        let mut state = self.controller.state.write();
        if self.is_current() && matches!(*state, SubmissionState::Submitting) {
            log::debug!("Submission cancelled (ticket {})", self.ticket);
            *state = previous;
        }
    }
}
