//! CLI Commands
//!
//! Wire the terminal presentation to the submission controller.

use anyhow::Context;
use std::io::{self, Write};

use crate::config::Config;
use crate::logic::client::{HttpPredictionClient, PredictionService};
use crate::logic::controller::{SubmissionController, SubmitOutcome};
use crate::logic::features::{FeatureInput, RawInput};
use crate::logic::result::ResultView;
use crate::logic::schema::FeatureSchema;
use super::{form, render};

fn build_controller(config: &Config) -> anyhow::Result<SubmissionController<HttpPredictionClient>> {
    let client = HttpPredictionClient::new(config.service_config())
        .context("Failed to create HTTP client")?;
    Ok(SubmissionController::new(config.schema.clone(), client))
}

/// Submit, tearing the controller down if the user interrupts
async fn submit_interruptible<S: PredictionService>(
    controller: &SubmissionController<S>,
    features: FeatureInput,
) -> SubmitOutcome {
    tokio::select! {
        outcome = controller.submit_features(features) => outcome,
        _ = tokio::signal::ctrl_c() => {
            controller.teardown();
            SubmitOutcome::Discarded
        }
    }
}

/// Validate, then submit. The busy label is only written once a request
/// is actually going out.
async fn submit_with_label<S: PredictionService, W: Write>(
    controller: &SubmissionController<S>,
    input: &RawInput,
    show_label: bool,
    out: &mut W,
) -> io::Result<SubmitOutcome> {
    let features = match controller.validate(input) {
        Ok(features) => features,
        Err(errors) => return Ok(SubmitOutcome::Invalid(errors)),
    };

    if show_label {
        writeln!(out, "{}", render::render_submit_button(true))?;
        out.flush()?;
    }
    Ok(submit_interruptible(controller, features).await)
}

/// Run the form on the blocking pool so stdin never stalls the runtime.
/// `None` when stdin hit end of input.
async fn prompt_form(schema: FeatureSchema, mut input: RawInput) -> anyhow::Result<Option<RawInput>> {
    let filled = tokio::task::spawn_blocking(move || -> io::Result<Option<RawInput>> {
        let filled = form::fill_form(&schema, &mut input, &mut io::stdin().lock(), &mut io::stdout())?;
        Ok(filled.then_some(input))
    })
    .await
    .context("Form task failed")??;
    Ok(filled)
}

async fn prompt_confirm(question: &'static str) -> anyhow::Result<bool> {
    let answer = tokio::task::spawn_blocking(move || {
        form::confirm(question, &mut io::stdin().lock(), &mut io::stdout())
    })
    .await
    .context("Prompt task failed")??;
    Ok(answer)
}

/// Report a non-success outcome. Returns true for success.
fn report(schema: &FeatureSchema, outcome: &SubmitOutcome) -> bool {
    match outcome {
        SubmitOutcome::Succeeded(_) => true,
        SubmitOutcome::Invalid(errors) => {
            eprintln!("Please fix the following fields:");
            eprintln!("{}", render::render_field_errors(schema, errors));
            false
        }
        SubmitOutcome::Failed(e) => {
            eprintln!("{}", render::render_submit_error(e));
            false
        }
        SubmitOutcome::Busy => {
            eprintln!("A prediction is already in progress");
            false
        }
        SubmitOutcome::Discarded => {
            eprintln!("Prediction cancelled");
            false
        }
    }
}

/// One-shot prediction from command line values
pub async fn predict(config: &Config, input: RawInput, json: bool) -> anyhow::Result<bool> {
    let controller = build_controller(config)?;
    let mut view = ResultView::new();

    let outcome = submit_with_label(&controller, &input, !json, &mut io::stdout()).await?;
    view.apply(&outcome);

    if !report(controller.schema(), &outcome) {
        return Ok(false);
    }

    if let Some(card) = view.current() {
        if json {
            println!("{}", render::render_json(card)?);
        } else {
            println!("{}", render::render_card(card));
        }
    }
    Ok(true)
}

/// Interactive form: fill, submit, show, repeat
pub async fn interactive(config: &Config) -> anyhow::Result<()> {
    let controller = build_controller(config)?;
    let mut view = ResultView::new();
    let mut input = RawInput::default();

    println!("Predict Game Outcome");
    println!("Predict the outcome of a game based on the features provided.\n");

    loop {
        input = match prompt_form(controller.schema().clone(), input).await? {
            Some(filled) => filled,
            None => break,
        };

        let outcome = submit_with_label(&controller, &input, true, &mut io::stdout()).await?;
        report(controller.schema(), &outcome);
        view.apply(&outcome);

        if let Some(card) = view.current() {
            println!("\n{}\n", render::render_card(card));
        }

        if controller.is_torn_down() || !prompt_confirm("Predict another match?").await? {
            break;
        }
    }

    Ok(())
}

/// Print the service's self-description
pub async fn info(config: &Config) -> anyhow::Result<bool> {
    let client = HttpPredictionClient::new(config.service_config())
        .context("Failed to create HTTP client")?;

    match client.service_info().await {
        Ok(info) => {
            println!("{}", render::render_service_info(&info));
            Ok(true)
        }
        Err(e) => {
            eprintln!("{} is not reachable: {}", client.base_url(), e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitError;
    use crate::logic::features::{Feature, PredictionRequest};
    use crate::logic::result::PredictionResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always predicts a win and counts requests
    #[derive(Default)]
    struct AlwaysWin {
        requests: AtomicUsize,
    }

    impl PredictionService for AlwaysWin {
        async fn predict(&self, _request: &PredictionRequest) -> Result<PredictionResult, SubmitError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(PredictionResult { win: true, probability: 0.7, prediction: 1.0 })
        }
    }

    fn controller() -> SubmissionController<AlwaysWin> {
        SubmissionController::new(FeatureSchema::default(), AlwaysWin::default())
    }

    #[tokio::test]
    async fn test_invalid_input_writes_no_busy_label() {
        let c = controller();
        let input = RawInput::default().with(Feature::Kills, "lots");
        let mut out = Vec::new();

        let outcome = submit_with_label(&c, &input, true, &mut out).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(out.is_empty());
        assert_eq!(c.service().requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_input_writes_busy_label_then_submits() {
        let c = controller();
        let mut out = Vec::new();

        let outcome = submit_with_label(&c, &RawInput::default(), true, &mut out).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Succeeded(_)));
        assert_eq!(String::from_utf8(out).unwrap(), "[Predicting...]\n");
        assert_eq!(c.service().requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_json_mode_writes_no_label() {
        let c = controller();
        let mut out = Vec::new();

        let outcome = submit_with_label(&c, &RawInput::default(), false, &mut out).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Succeeded(_)));
        assert!(out.is_empty());
    }
}
