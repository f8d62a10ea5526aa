#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for savegame-metrics
//!
//! This library holds all functionality for the `savegame-metrics` tool, which reads a
//! farming dedicated server's savegame documents and writes derived metrics to InfluxDB.
//! Its API is fluid and may change without warning.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`snapshot`]: Document retrieval, parsing, and navigation
//! - [`metrics`]: Metric derivation from a snapshot
//! - [`sink`]: Point building and delivery to the time-series store

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod metrics;

#[doc(hidden)]
pub mod sink;

#[doc(hidden)]
pub mod snapshot;

pub use crate::commands::{Host, run};
