//! Command-line interface and orchestration for savegame-metrics
//!
//! This module implements the CLI commands and wires the other modules together into a
//! collection cycle. It handles argument parsing, configuration management, and the
//! high-level workflow.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **collect**: Run exactly one collection cycle. An external scheduler (cron, a
//!   systemd timer) decides when the next one happens.
//! - **init**: Generate a default configuration file
//! - **validate**: Check that the configuration, with overrides applied, is complete
//!
//! ## Collection Cycle
//!
//! 1. Resolve configuration from the TOML file, command line, and environment
//! 2. Open the sink writer (InfluxDB, or the terminal for a dry run)
//! 3. Fetch and parse all four documents concurrently into a snapshot
//! 4. Run every metric derivation over the snapshot
//! 5. Build all points, then hand them to the sink
//! 6. Drain and close the sink, whether or not the earlier steps succeeded

mod collect;
mod common;
mod config;
mod host;
mod init;
mod run;
mod validate;

pub use collect::{CollectArgs, collect, run_cycle};
pub use common::{CommonArgs, LogLevel};
pub use config::{ApiConfig, Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML, InfluxConfig};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
