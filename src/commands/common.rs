//! Arguments and setup shared between commands.

use super::config::Config;
use crate::Result;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Configuration file selection and per-value overrides
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Path to configuration file (default is `savegame-metrics.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Base URL of the dedicated server's web interface
    #[arg(long, value_name = "URL", env = "API_URL", help_heading = "Server")]
    pub api_url: Option<String>,

    /// Access code for the dedicated server's web interface
    #[arg(long, value_name = "CODE", env = "API_CODE", hide_env_values = true, help_heading = "Server")]
    pub api_code: Option<String>,

    /// InfluxDB server URL
    #[arg(long, value_name = "URL", env = "INFLUX_URL", help_heading = "InfluxDB")]
    pub influx_url: Option<String>,

    /// InfluxDB API token
    #[arg(long, value_name = "TOKEN", env = "INFLUX_TOKEN", hide_env_values = true, help_heading = "InfluxDB")]
    pub influx_token: Option<String>,

    /// InfluxDB organization
    #[arg(long, value_name = "ORG", env = "INFLUX_ORG", help_heading = "InfluxDB")]
    pub influx_org: Option<String>,

    /// InfluxDB bucket receiving the points
    #[arg(long, value_name = "BUCKET", env = "INFLUX_BUCKET", help_heading = "InfluxDB")]
    pub influx_bucket: Option<String>,

    /// Number of points buffered before a write is issued
    #[arg(long, value_name = "COUNT", help_heading = "InfluxDB")]
    pub outbox_capacity: Option<usize>,
}

impl CommonArgs {
    /// Load the configuration file, then apply any values given on the command line or
    /// through the environment.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        let overrides = [
            (&self.api_url, &mut config.api.base_url),
            (&self.api_code, &mut config.api.code),
            (&self.influx_url, &mut config.influx.url),
            (&self.influx_token, &mut config.influx.token),
            (&self.influx_org, &mut config.influx.org),
            (&self.influx_bucket, &mut config.influx.bucket),
        ];

        for (value, target) in overrides {
            if let Some(value) = value {
                value.clone_into(target);
            }
        }

        if let Some(capacity) = self.outbox_capacity {
            config.influx.outbox_capacity = capacity;
        }
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let args = CommonArgs {
            api_url: Some("http://server/feed/".to_string()),
            influx_bucket: Some("override".to_string()),
            outbox_capacity: Some(7),
            ..CommonArgs::default()
        };

        let mut config = Config::default();
        config.influx.bucket = "from-file".to_string();
        config.influx.org = "kept".to_string();

        args.apply_overrides(&mut config);
        assert_eq!(config.api.base_url, "http://server/feed/");
        assert_eq!(config.influx.bucket, "override");
        assert_eq!(config.influx.org, "kept");
        assert_eq!(config.influx.outbox_capacity, 7);
    }
}
