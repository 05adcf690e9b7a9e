//! Match Predictor CLI
//!
//! Enter a match's statistics, get a win/loss prediction.

use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;

use match_predictor::api::commands;
use match_predictor::constants;
use match_predictor::logic::features::{Feature, RawInput};
use match_predictor::Config;

#[derive(Parser)]
#[command(name = "match-predictor", version)]
#[command(about = "Predict the outcome of a game based on the features provided", long_about = None)]
struct Cli {
    /// Prediction service base URL (overrides PREDICT_SERVICE_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict one match from command line values (unset fields are 0)
    Predict {
        #[command(flatten)]
        features: FeatureArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill the form interactively
    Form,
    /// Show the prediction service's name, version and endpoints
    Info,
}

/// Raw field values, passed to the validator as typed
#[derive(Args)]
struct FeatureArgs {
    #[arg(long, allow_hyphen_values = true)]
    kills: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    total_minion_kills: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    assist: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    baron_kills: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    tower_kills: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    dragon_kills: Option<String>,
    /// Game duration in seconds
    #[arg(long, allow_hyphen_values = true)]
    game_duration: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    death: Option<String>,
}

impl FeatureArgs {
    fn into_raw_input(self) -> RawInput {
        let values = [
            self.kills,
            self.total_minion_kills,
            self.assist,
            self.baron_kills,
            self.tower_kills,
            self.dragon_kills,
            self.game_duration,
            self.death,
        ];

        let mut input = RawInput::default();
        for (feature, value) in Feature::ALL.into_iter().zip(values) {
            if let Some(value) = value {
                input.set(feature, value);
            }
        }
        input
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    dotenvy::dotenv().ok();
    let mut config = Config::from_env()?;
    if let Some(url) = cli.url {
        config.service_url = url;
    }

    log::debug!("{} v{} using {}", constants::APP_NAME, constants::APP_VERSION, config.service_url);

    let ok = match cli.command {
        Commands::Predict { features, json } => {
            commands::predict(&config, features.into_raw_input(), json).await?
        }
        Commands::Form => {
            commands::interactive(&config).await?;
            true
        }
        Commands::Info => commands::info(&config).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
