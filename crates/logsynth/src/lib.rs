//! # logsynth
//!
//! Synthetic log-record load generation for batch ingestion endpoints.
//!
//! Two modes are supported:
//! - **Backfill**: emit a fixed total number of records with timestamps
//!   scattered across a historical window, then stop.
//! - **Stream**: emit records continuously at a target rate until
//!   cancelled.
//!
//! The engine is strictly sequential: one generate-then-dispatch cycle at a
//! time, never more than one request in flight. Backfill aborts on the
//! first connection failure; stream logs it and keeps going. Both
//! behaviors flow from [`runner::FailurePolicy`].

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

/// Record batching ahead of dispatch
pub mod batch;

/// Environment-driven run configuration
pub mod config;

/// Error types for configuration and client construction
pub mod errors;

/// Synthetic record production from value pools and a seedable RNG
pub mod generator;

/// Batch dispatch to the ingestion endpoint and outcome classification
pub mod intake;

/// Fixed-quantum pacing for stream cycles
pub mod pacer;

/// The wire model of a log record
pub mod record;

/// The per-mode run loop
pub mod runner;

/// Timestamp spreading and formatting
pub mod timestamp;
