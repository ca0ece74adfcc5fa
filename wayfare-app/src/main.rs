use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_app::{AppError, AppState, BookingForm, Config};
use wayfare_catalog::FareBreakdown;
use wayfare_core::{BookingRequest, ValidationErrors};

/// What the binary prints for one booking request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Outcome {
    valid: bool,
    errors: ValidationErrors,
    fare: Option<FareBreakdown>,
    quote_error: Option<String>,
    summary: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare=debug,wayfare_app=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    let state = AppState::from_config(&config)?;

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            buf
        }
    };
    let request: BookingRequest = serde_json::from_str(&raw).context("Malformed booking request")?;
    tracing::info!(product = %request.product, "validating booking request");

    let mut form = BookingForm::with_request(state, request);
    let (fare, quote_error) = match form.quote() {
        Some(Ok(fare)) => (Some(fare.clone()), None),
        Some(Err(err)) => (None, Some(err.to_string())),
        None => (None, None),
    };

    let today = chrono::Local::now().date_naive();
    let outcome = match form.submit(today) {
        Ok(summary) => Outcome {
            valid: true,
            errors: ValidationErrors::new(),
            fare,
            quote_error,
            summary: Some(summary.to_string()),
        },
        Err(AppError::Rejected(errors)) => Outcome {
            valid: false,
            errors,
            fare,
            quote_error,
            summary: None,
        },
        Err(err) => return Err(err.into()),
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(if outcome.valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
