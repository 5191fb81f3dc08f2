// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::env;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use logsynth::{
    config::{Config, RunMode},
    generator::{RecordFactory, SyntheticProfile},
    intake::IntakeClient,
    runner::{RunLoop, RunOutcome},
};

use tokio_util::sync::CancellationToken;

#[tokio::main]
pub async fn main() {
    let log_level = env::var("LOGSYNTH_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    let env_filter = format!("h2=off,hyper=off,rustls=off,{}", log_level);

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Error creating config on load generator startup: {e}");
            std::process::exit(1);
        }
    };

    let factory = match config.seed {
        Some(seed) => {
            debug!("Seeding record generation with {seed}");
            RecordFactory::with_seed(SyntheticProfile::default(), seed)
        }
        None => RecordFactory::new(SyntheticProfile::default()),
    };

    let intake = match IntakeClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Error building intake client on load generator startup: {e}");
            std::process::exit(1);
        }
    };

    let cancel_token = CancellationToken::new();
    // Only the stream loop observes the token. Backfill leaves SIGINT at
    // its default disposition so an interrupt still kills the run.
    if config.mode == RunMode::Stream {
        let signal_token = cancel_token.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, finishing the current cycle");
                    signal_token.cancel();
                }
                Err(e) => error!("Failed to listen for Ctrl+C: {e}"),
            }
        });
    }

    match config.mode {
        RunMode::Backfill => info!(
            "Starting backfill of {} records to {}",
            config.total_records, config.intake_url
        ),
        RunMode::Stream => info!(
            "Starting stream of {} records/s to {}",
            config.records_per_second, config.intake_url
        ),
    }

    let summary = RunLoop::new(&config, factory, intake, cancel_token)
        .run()
        .await;

    match summary.outcome {
        RunOutcome::Completed => info!(
            "Run complete: {} of {} generated records accepted across {} batches",
            summary.sent, summary.generated, summary.batches
        ),
        RunOutcome::Aborted => {
            error!(
                "Run aborted after {} batches: {} of {} generated records accepted",
                summary.batches, summary.sent, summary.generated
            );
            std::process::exit(1);
        }
    }
}
