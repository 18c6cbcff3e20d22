use std::env;
use std::fmt;
use std::time::Duration;

use crate::constants::DEFAULT_PAGE_COUNT;

/// Output format of the process logger, selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Colored, human readable lines.
    Human,
    /// One JSON object per line.
    Json,
    /// Human readable lines without color.
    Plain,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("HUMAN") => LogFormat::Human,
            Some("JSON") => LogFormat::Json,
            _ => LogFormat::Plain,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { var, value } => {
                write!(f, "{} has an invalid value: {:?}", var, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process configuration, built once at startup and shared with handlers
/// through `web::Data`.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_version: String,
    pub allow_origin: String,
    pub log_format: LogFormat,
    pub mode: Option<String>,
    pub docker_fake: bool,
    pub default_page_count: usize,
    pub docker_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            api_version: env!("CARGO_PKG_VERSION").to_string(),
            allow_origin: String::new(),
            log_format: LogFormat::Plain,
            mode: None,
            docker_fake: false,
            default_page_count: DEFAULT_PAGE_COUNT,
            docker_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// In dev mode (`MODE` unset) a `.env` file is loaded first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if env::var("MODE").is_err() {
            dotenv::dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_port = match lookup("API_PORT") {
            Some(value) => parse_port(&value)?,
            None => defaults.server_port,
        };

        let docker_fake = match lookup("DOCKER_FAKE") {
            Some(value) => parse_bool("DOCKER_FAKE", &value)?,
            None => defaults.docker_fake,
        };

        let default_page_count = match lookup("DEFAULT_PAGE_COUNT") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(count) if count > 0 => count,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "DEFAULT_PAGE_COUNT",
                        value,
                    })
                }
            },
            None => defaults.default_page_count,
        };

        let docker_timeout = match lookup("DOCKER_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "DOCKER_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => defaults.docker_timeout,
        };

        Ok(Self {
            server_host: lookup("SERVER_HOST")
                .filter(|h| !h.is_empty())
                .unwrap_or(defaults.server_host),
            server_port,
            api_version: lookup("API_VERSION")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_version),
            allow_origin: lookup("ALLOW_ORIGIN").unwrap_or_default(),
            log_format: LogFormat::parse(lookup("LOG_FORMAT").as_deref()),
            mode: lookup("MODE").filter(|m| !m.is_empty()),
            docker_fake,
            default_page_count,
            docker_timeout,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Accepts both `8080` and the Go-style `:8080`.
fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .trim_start_matches(':')
        .parse()
        .map_err(|_| ConfigError::Invalid {
            var: "API_PORT",
            value: value.to_string(),
        })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
        }),
    }
}
