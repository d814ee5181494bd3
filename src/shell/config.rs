use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::modules::leave_applications::core::attachment::MAX_ATTACHMENT_BYTES;
use crate::modules::leave_applications::use_cases::validate_leave_request::validate::ValidationPolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout: Option<Duration>,
    pub max_attachment_bytes: u64,
    pub require_medical_attachment: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout: None,
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            require_medical_attachment: false,
        }
    }
}

impl Config {
    /// Reads `.env` (if any) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let api_base_url = lookup("LEAVE_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.api_base_url);

        let http_timeout = parse_optional::<u64>(&lookup, "LEAVE_HTTP_TIMEOUT_SECS")?
            .map(Duration::from_secs);

        let max_attachment_bytes = parse_optional::<u64>(&lookup, "LEAVE_MAX_ATTACHMENT_BYTES")?
            .unwrap_or(defaults.max_attachment_bytes);

        let require_medical_attachment =
            parse_optional::<bool>(&lookup, "LEAVE_REQUIRE_MEDICAL_ATTACHMENT")?
                .unwrap_or(defaults.require_medical_attachment);

        Ok(Self {
            api_base_url,
            http_timeout,
            max_attachment_bytes,
            require_medical_attachment,
        })
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            max_attachment_bytes: self.max_attachment_bytes,
            require_medical_attachment: self.require_medical_attachment,
        }
    }
}

fn parse_optional<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
