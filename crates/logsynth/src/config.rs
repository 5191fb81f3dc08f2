// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use reqwest::StatusCode;
use std::env;
use std::time::Duration;

use crate::errors::GeneratorError;
use crate::timestamp;

pub const DEFAULT_INTAKE_URL: &str = "http://localhost:8080/api/v1/logs/batch";

const DEFAULT_BATCH_SIZE: usize = 500;
const DEFAULT_TOTAL_RECORDS: usize = 10_000;
const DEFAULT_RECORDS_PER_SECOND: usize = 1_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Operating mode for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Emit a fixed number of records spread over a historical window, then stop
    Backfill,
    /// Emit records continuously at a target rate until cancelled
    Stream,
}

impl RunMode {
    /// Parse a mode name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "backfill" => Some(RunMode::Backfill),
            "stream" => Some(RunMode::Stream),
            _ => None,
        }
    }
}

/// Configuration for a load generation run
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the batch ingestion endpoint
    pub intake_url: String,
    /// Operating mode, backfill or stream
    pub mode: RunMode,
    /// Maximum number of records per dispatched batch (backfill)
    pub batch_size: usize,
    /// Total number of records to emit before stopping (backfill)
    pub total_records: usize,
    /// Historical window record timestamps are spread across (backfill)
    pub backfill_window_secs: u64,
    /// Target emission rate; also the per-cycle batch size (stream)
    pub records_per_second: usize,
    /// Per-request timeout applied by the intake client
    pub request_timeout: Duration,
    /// Status code the intake returns for an accepted batch
    pub accept_status: StatusCode,
    /// Fixed RNG seed for reproducible runs; None seeds from OS entropy
    pub seed: Option<u64>,
    /// Log level (e.g., trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intake_url: DEFAULT_INTAKE_URL.to_string(),
            mode: RunMode::Backfill,
            batch_size: DEFAULT_BATCH_SIZE,
            total_records: DEFAULT_TOTAL_RECORDS,
            backfill_window_secs: timestamp::DEFAULT_WINDOW_SECS,
            records_per_second: DEFAULT_RECORDS_PER_SECOND,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            accept_status: StatusCode::ACCEPTED,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create configuration from environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults; an unknown
    /// mode is an error since guessing the wrong one would either hammer the
    /// intake forever or stop after one pass.
    pub fn from_env() -> Result<Self, GeneratorError> {
        let intake_url =
            env::var("LOGSYNTH_INTAKE_URL").unwrap_or_else(|_| DEFAULT_INTAKE_URL.to_string());
        let mode = match env::var("LOGSYNTH_MODE") {
            Ok(val) => RunMode::parse(&val).ok_or_else(|| {
                GeneratorError::InvalidConfig(format!(
                    "Unknown mode '{val}'. Must be one of: backfill, stream"
                ))
            })?,
            Err(_) => RunMode::Backfill,
        };
        let batch_size = env::var("LOGSYNTH_BATCH_SIZE")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_BATCH_SIZE);
        let total_records = env::var("LOGSYNTH_TOTAL_RECORDS")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_TOTAL_RECORDS);
        let backfill_window_secs = env::var("LOGSYNTH_BACKFILL_WINDOW")
            .map(|val| timestamp::window_seconds(&val))
            .unwrap_or(timestamp::DEFAULT_WINDOW_SECS);
        let records_per_second = env::var("LOGSYNTH_RECORDS_PER_SECOND")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_RECORDS_PER_SECOND);
        let request_timeout = env::var("LOGSYNTH_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
        let seed = env::var("LOGSYNTH_SEED")
            .ok()
            .and_then(|val| val.parse::<u64>().ok());
        let log_level = env::var("LOGSYNTH_LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or_else(|_| "info".to_string());

        let config = Self {
            intake_url,
            mode,
            batch_size,
            total_records,
            backfill_window_secs,
            records_per_second,
            request_timeout,
            accept_status: StatusCode::ACCEPTED,
            seed,
            log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.intake_url.trim().is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "LOGSYNTH_INTAKE_URL cannot be empty".to_string(),
            ));
        }

        if self.batch_size == 0 {
            return Err(GeneratorError::InvalidConfig(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        if self.total_records == 0 {
            return Err(GeneratorError::InvalidConfig(
                "Total record count must be greater than 0".to_string(),
            ));
        }

        if self.records_per_second == 0 {
            return Err(GeneratorError::InvalidConfig(
                "Records per second must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(GeneratorError::InvalidConfig(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(GeneratorError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }
}
