// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::record::LogRecord;

/// Accumulates records until a batch is ready to dispatch.
///
/// One accumulator exists per run and it is never shared across tasks.
#[derive(Debug)]
pub struct BatchAccumulator {
    max_batch_size: usize,
    records: Vec<LogRecord>,
}

impl BatchAccumulator {
    pub fn new(max_batch_size: usize) -> Self {
        Self {
            max_batch_size,
            records: Vec::with_capacity(max_batch_size),
        }
    }

    /// Append one record to the open batch.
    pub fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    /// True once the open batch has reached the configured maximum size.
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.max_batch_size
    }

    /// Take the current contents, leaving the accumulator empty.
    ///
    /// Also called for the trailing partial batch at the end of a backfill
    /// run, so the returned batch may be smaller than the configured size.
    pub fn drain(&mut self) -> Vec<LogRecord> {
        std::mem::replace(&mut self.records, Vec::with_capacity(self.max_batch_size))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
