use crate::Result;
use crate::sink::DEFAULT_OUTBOX_CAPACITY;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked for in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "savegame-metrics.toml";

const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub influx: InfluxConfig,
}

/// Where the savegame documents come from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    pub code: String,

    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            code: String::new(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Where the points go
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
    pub outbox_capacity: usize,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            org: String::new(),
            bucket: String::new(),
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicitly named file must exist. Without one, `savegame-metrics.toml` in the
    /// working directory is used if present. The result is not validated, since command
    /// line overrides are applied afterwards.
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = Utf8PathBuf::from(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))
    }

    /// Check that every value needed to run a collection cycle is present and sane.
    pub fn validate(&self) -> Result<()> {
        self.validate_api()?;
        self.validate_influx()
    }

    /// Check only the document retrieval settings, which is all a dry run needs.
    pub fn validate_api(&self) -> Result<()> {
        check_url("api.base_url", &self.api.base_url)?;
        check_present("api.code", &self.api.code)?;

        if self.api.request_timeout.is_zero() {
            bail!("api.request_timeout must be greater than zero");
        }

        Ok(())
    }

    fn validate_influx(&self) -> Result<()> {
        check_url("influx.url", &self.influx.url)?;
        check_present("influx.token", &self.influx.token)?;
        check_present("influx.org", &self.influx.org)?;
        check_present("influx.bucket", &self.influx.bucket)?;

        if self.influx.outbox_capacity == 0 {
            bail!("influx.outbox_capacity must be greater than zero");
        }

        Ok(())
    }
}

fn check_present(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(app_err!("{name} must be set"));
    }

    Ok(())
}

fn check_url(name: &str, value: &str) -> Result<()> {
    check_present(name, value)?;

    let url = Url::parse(value).into_app_err_with(|| format!("{name} is not a valid URL: '{value}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(app_err!("{name} must be an http or https URL, got '{value}'"));
    }

    Ok(())
}
