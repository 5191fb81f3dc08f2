// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::warn;

/// Lookback window used when no recognized name is configured
pub const DEFAULT_WINDOW_SECS: u64 = 86_400;

/// How record timestamps relate to the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpread {
    /// Stamp each record with the moment it is generated
    Live,
    /// Scatter timestamps uniformly across the past `window_secs` seconds
    Backfill { window_secs: u64 },
}

impl TimeSpread {
    /// Pick the timestamp for the next record, consuming randomness only in
    /// the backfill case.
    pub fn sample<R: Rng>(self, rng: &mut R) -> DateTime<Utc> {
        self.sample_at(rng, Utc::now())
    }

    fn sample_at<R: Rng>(self, rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TimeSpread::Live => now,
            TimeSpread::Backfill { window_secs } => {
                let offset = rng.random_range(0..=window_secs);
                now - Duration::seconds(offset as i64)
            }
        }
    }
}

/// Resolve a named lookback window to seconds.
///
/// An unrecognized name degrades to the 24 hour default instead of failing,
/// so a typo in the environment still produces a usable backfill run.
pub fn window_seconds(name: &str) -> u64 {
    match name {
        "last-hour" => 3_600,
        "last-6-hours" => 21_600,
        "last-24-hours" => 86_400,
        "last-week" => 604_800,
        other => {
            warn!("Unrecognized backfill window '{other}', falling back to last-24-hours");
            DEFAULT_WINDOW_SECS
        }
    }
}

/// Format a timestamp the way the intake expects it: UTC with exactly three
/// fractional digits and a literal `Z`, e.g. `2025-12-23T10:30:45.123Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
