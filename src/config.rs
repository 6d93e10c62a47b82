use chrono::{NaiveTime, Timelike};
use governor::Quota;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::services::availability::parse_slot_time;

const DEFAULT_DATA_PATH: &str = "bu_study_spaces.json";
const DEFAULT_RATE_LIMIT: &str = "60 per minute";
const DEFAULT_MAX_CONTENT_LENGTH: usize = 1024 * 1024;
const DEFAULT_LOG_LEVEL: &str = "INFO";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("RATE_LIMIT must look like \"60 per minute\", got {0:?}")]
    InvalidRateLimit(String),
    #[error("CURRENT_TIME_OVERRIDE must be HH:MM:SS, got {0:?}")]
    InvalidTime(String),
}

/// Runtime settings, read from the environment once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    /// CORS is off when this is empty
    pub cors_origins: Vec<String>,
    pub rate_limit: Quota,
    pub max_content_length: usize,
    pub log_level: String,
    pub host: String,
    pub port: u16,
    /// Pins the time of day used to classify slots
    pub current_time_override: Option<NaiveTime>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let max_content_length = match lookup("MAX_CONTENT_LENGTH") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "MAX_CONTENT_LENGTH",
                    value,
                })?,
            None => DEFAULT_MAX_CONTENT_LENGTH,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let current_time_override = lookup("CURRENT_TIME_OVERRIDE")
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_slot_time(value.trim()).map_err(|_| ConfigError::InvalidTime(value)))
            .transpose()?;

        Ok(Config {
            data_path: PathBuf::from(var("DATA_PATH", DEFAULT_DATA_PATH)),
            cors_origins: parse_origins(&var("CORS_ORIGINS", "")),
            rate_limit: parse_rate_limit(&var("RATE_LIMIT", DEFAULT_RATE_LIMIT))?,
            max_content_length,
            log_level: var("LOG_LEVEL", DEFAULT_LOG_LEVEL).to_uppercase(),
            host: var("HOST", DEFAULT_HOST),
            port,
            current_time_override,
        })
    }

    /// `LOG_LEVEL` as a tracing filter directive
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "WARN" | "WARNING" => "warn",
            "ERROR" | "CRITICAL" => "error",
            _ => "info",
        }
    }

    /// The time of day requests are classified against
    pub fn current_time(&self) -> NaiveTime {
        self.current_time_override.unwrap_or_else(|| {
            let now = chrono::Local::now().time();
            now.with_nanosecond(0).unwrap_or(now)
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

/// Parses limits such as `60 per minute` or `10/second` into a quota that
/// allows the whole amount as a burst and refills evenly over the period.
fn parse_rate_limit(raw: &str) -> Result<Quota, ConfigError> {
    let invalid = || ConfigError::InvalidRateLimit(raw.to_string());

    let (amount, unit) = raw
        .split_once('/')
        .or_else(|| raw.split_once(" per "))
        .ok_or_else(invalid)?;

    let amount: NonZeroU32 = amount.trim().parse().map_err(|_| invalid())?;

    let period = match unit.trim().to_lowercase().trim_end_matches('s') {
        "second" => Duration::from_secs(1),
        "minute" => Duration::from_secs(60),
        "hour" => Duration::from_secs(60 * 60),
        "day" => Duration::from_secs(24 * 60 * 60),
        _ => return Err(invalid()),
    };

    Quota::with_period(period / amount.get())
        .map(|quota| quota.allow_burst(amount))
        .ok_or_else(invalid)
}
