// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain types, the sentiment scorer, and the transport-agnostic processing
//! pipeline shared by the ingestion and worker binaries.

pub mod config;
pub mod error;
pub mod history;
pub mod ports;
pub mod processor;
pub mod reputation;
pub mod scorer;
pub mod testing;
pub mod types;

pub use config::Tuning;
pub use error::DeadLetterReason;
pub use ports::{AlertSink, DurableLog, HotStore};
pub use processor::{process_event, ProcessError, ProcessOutcome};
pub use types::{Driver, DriverHistory, DriverReputation, DriverScore, FeedbackEvent, ScorePoint, ScoredFeedback};
