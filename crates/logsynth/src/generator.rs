// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Builder;

use crate::record::{LogRecord, RecordMetadata};
use crate::timestamp::{self, TimeSpread};

/// Value pools the generator draws record fields from.
///
/// Injected into [`RecordFactory`] so alternate vocabularies can be swapped
/// in without touching the generator. Pools are expected to be non-empty;
/// an empty pool yields empty strings for its field.
#[derive(Debug, Clone)]
pub struct SyntheticProfile {
    pub services: Vec<String>,
    pub levels: Vec<String>,
    pub messages: Vec<String>,
    pub regions: Vec<String>,
    /// Fixed version string stamped into every record's metadata
    pub version: String,
}

impl Default for SyntheticProfile {
    fn default() -> Self {
        Self {
            services: vec_of(&[
                "auth-service",
                "payment-service",
                "notification-service",
                "user-service",
                "inventory-service",
                "shipping-service",
            ]),
            levels: vec_of(&["INFO", "DEBUG", "WARNING", "ERROR"]),
            messages: vec_of(&[
                "User logged in successfully",
                "Payment processed with transaction id",
                "Critical database connection timeout error occurred",
                "Cache miss for user profile",
                "API request received from external gateway",
                "Authentication failed due to invalid token",
                "Transaction completed successfully",
                "Error processing request: NullPointerException",
                "Scheduled maintenance task started",
                "Dependency service unavailable: retry count exceeded",
            ]),
            regions: vec_of(&["us-east-1", "us-west-2", "eu-central-1", "ap-northeast-1"]),
            version: "v1.0.2".to_string(),
        }
    }
}

fn vec_of(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Produces synthetic log records from a value profile and an owned,
/// seedable randomness source.
pub struct RecordFactory {
    profile: SyntheticProfile,
    rng: StdRng,
}

impl RecordFactory {
    /// Build a factory seeded from OS entropy.
    pub fn new(profile: SyntheticProfile) -> Self {
        Self {
            profile,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Build a factory with a fixed seed so runs are reproducible.
    pub fn with_seed(profile: SyntheticProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate one record stamped according to `spread`.
    pub fn generate(&mut self, spread: TimeSpread) -> LogRecord {
        let ts = spread.sample(&mut self.rng);
        self.build(ts)
    }

    fn build(&mut self, ts: DateTime<Utc>) -> LogRecord {
        let Self { profile, rng } = self;

        // Derive the trace id from 128 RNG bits so seeded runs stay
        // reproducible while keeping the v4 layout.
        let trace_uuid = Builder::from_random_bytes(rng.random()).into_uuid();
        let message_tag: u32 = rng.random();

        LogRecord {
            timestamp: timestamp::format_timestamp(ts),
            service_id: pick(rng, &profile.services).to_string(),
            level: pick(rng, &profile.levels).to_string(),
            message: format!("{} - {:08x}", pick(rng, &profile.messages), message_tag),
            trace_id: format!("trace-{trace_uuid}"),
            metadata: RecordMetadata {
                request_id: format!("req-{}", rng.random_range(1_000..=9_999)),
                region: pick(rng, &profile.regions).to_string(),
                latency_ms: rng.random_range(5..=2_000),
                version: profile.version.clone(),
            },
        }
    }
}

fn pick<'a>(rng: &mut StdRng, pool: &'a [String]) -> &'a str {
    if pool.is_empty() {
        return "";
    }
    pool[rng.random_range(0..pool.len())].as_str()
}
