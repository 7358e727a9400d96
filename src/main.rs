use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use climarisk::risk::evaluate_alerts;
use climarisk::{AssessmentRequest, ClimaRiskConfig, RiskEngine, RiskError, RiskResult, logging};
use tracing::{debug, info, warn};

/// Climate-health risk scoring from weather and air-quality readings
#[derive(Parser, Debug)]
#[command(name = "climarisk", version)]
#[command(about = "Climate-health risk scoring from weather and air-quality readings", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one request object or an array of requests
    Assess {
        /// JSON request file, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,

        /// Log sub-indices that reach their alert threshold
        #[arg(long)]
        alerts: bool,
    },
    /// Print the default scoring configuration
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ClimaRiskConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;
    debug!(?cli.config, "Configuration loaded");

    match cli.command {
        Command::Assess {
            input,
            pretty,
            alerts,
        } => {
            let engine = RiskEngine::new(config.scoring, config.confidence);
            let raw = read_input(input.as_ref())?;
            // Dispatch on the JSON shape so field errors from the request
            // type reach the user intact.
            let payload: serde_json::Value =
                serde_json::from_str(&raw).map_err(RiskError::from)?;

            let output = if payload.is_array() {
                let requests: Vec<AssessmentRequest> =
                    serde_json::from_value(payload).map_err(RiskError::from)?;
                info!(count = requests.len(), "Scoring batch");
                let results = requests
                    .iter()
                    .enumerate()
                    .map(|(i, request)| {
                        assess_one(&engine, request, alerts)
                            .with_context(|| format!("Request #{i} failed"))
                    })
                    .collect::<Result<Vec<RiskResult>>>()?;
                to_json(&results, pretty)?
            } else {
                let request: AssessmentRequest =
                    serde_json::from_value(payload).map_err(RiskError::from)?;
                let result = assess_one(&engine, &request, alerts)?;
                to_json(&result, pretty)?
            };
            println!("{output}");
        }
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&config.scoring)?);
        }
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            Ok(buffer)
        }
    }
}

fn assess_one(engine: &RiskEngine, request: &AssessmentRequest, alerts: bool) -> Result<RiskResult> {
    let result = engine.assess(request)?;

    if alerts {
        let thresholds = engine.effective_config(request).thresholds;
        for signal in evaluate_alerts(&result, &thresholds) {
            warn!(
                kind = %signal.kind,
                severity = %signal.severity,
                value = signal.value,
                threshold = signal.threshold,
                date = %result.date,
                "Alert threshold reached"
            );
        }
    }

    Ok(result)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
