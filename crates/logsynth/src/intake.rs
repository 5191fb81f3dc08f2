// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use reqwest::StatusCode;
use std::time::Instant;
use tracing::debug;

use crate::config::Config;
use crate::errors::GeneratorError;
use crate::record::LogRecord;

/// Classified result of shipping one batch.
///
/// The batch is consumed in every case; nothing here retries or requeues.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The intake acknowledged the batch with the accepted status code
    Accepted { count: usize },
    /// The intake answered with any other status code
    Rejected { status: StatusCode, body: String },
    /// No response was received at all, e.g. refused connection, DNS
    /// failure, or a timeout before the response arrived
    ConnectionFailure { reason: String },
}

/// Ships record batches to the ingestion endpoint.
///
/// The underlying client is built once and reused, so connections are
/// pooled across batches.
pub struct IntakeClient {
    endpoint: String,
    accept_status: StatusCode,
    client: reqwest::Client,
}

impl IntakeClient {
    pub fn new(config: &Config) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GeneratorError::ClientBuild(e.to_string()))?;

        Ok(IntakeClient {
            endpoint: config.intake_url.clone(),
            accept_status: config.accept_status,
            client,
        })
    }

    /// Send one batch as a JSON array and classify what came back.
    ///
    /// A response body that cannot be read is reported as a rejection with
    /// an empty body, never as a connection failure, since the intake did
    /// answer.
    pub async fn send_batch(&self, batch: &[LogRecord]) -> DispatchOutcome {
        let count = batch.len();
        let start = Instant::now();
        let response = self.client.post(&self.endpoint).json(batch).send().await;
        let elapsed = start.elapsed();

        match response {
            Ok(resp) => {
                let status = resp.status();
                if status == self.accept_status {
                    debug!(
                        "Intake accepted {count} records in {} ms",
                        elapsed.as_millis()
                    );
                    DispatchOutcome::Accepted { count }
                } else {
                    let body = resp.text().await.unwrap_or_default();
                    DispatchOutcome::Rejected { status, body }
                }
            }
            Err(e) => DispatchOutcome::ConnectionFailure {
                reason: e.to_string(),
            },
        }
    }
}
