// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;
use tokio::time::Instant;

/// Wall-clock period every stream cycle is paced against
pub const STREAM_QUANTUM: Duration = Duration::from_secs(1);

/// Paces stream cycles against a fixed quantum.
///
/// Each cycle sleeps only for whatever is left of the quantum after the
/// cycle's work. Overruns are absorbed: the next cycle starts immediately
/// and no shortfall is carried forward, so sustained overload degrades
/// throughput smoothly instead of bursting to catch up.
#[derive(Debug, Clone, Copy)]
pub struct CyclePacer {
    quantum: Duration,
}

impl CyclePacer {
    pub fn new(quantum: Duration) -> Self {
        CyclePacer { quantum }
    }

    /// Mark the start of a cycle.
    pub fn begin(&self) -> Instant {
        Instant::now()
    }

    /// Sleep out the remainder of the quantum for the cycle that began at
    /// `started`. Returns the slept duration, zero when the cycle overran.
    pub async fn finish(&self, started: Instant) -> Duration {
        let remaining = self.quantum.saturating_sub(started.elapsed());
        if !remaining.is_zero() {
            tokio::time::sleep(remaining).await;
        }
        remaining
    }
}
