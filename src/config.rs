use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::agents::errors::{SyncError, SyncResult};
use crate::agents::mock_source::MockTiming;
use crate::domain::approval::ClearPolicy;

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Backend origin for the SSE channel and approval gateway
    pub api_url: String,
    /// Feed the store from the in-process mock scripts instead of `api_url`
    pub use_mock: bool,
    pub known_agents: Vec<String>,
    pub max_reconnect_attempts: u32,
    pub approval_clear_policy: ClearPolicy,
    pub mock_step_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_url: "http://localhost:3000".to_string(),
            use_mock: false,
            known_agents: vec!["resume_agent".to_string(), "job_search_agent".to_string()],
            max_reconnect_attempts: 3,
            approval_clear_policy: ClearPolicy::Always,
            mock_step_delay: Duration::from_millis(1000),
        }
    }
}

impl Config {
    pub fn from_env() -> SyncResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SyncResult<Self> {
        let defaults = Self::default();

        let api_url = match lookup("CAREERHQ_API_URL") {
            Some(url) => url,
            None => {
                tracing::warn!(
                    default = %defaults.api_url,
                    "CAREERHQ_API_URL not set, using default"
                );
                defaults.api_url
            }
        };

        let known_agents = match lookup("KNOWN_AGENTS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.known_agents,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            api_url,
            use_mock: match lookup("USE_MOCK") {
                Some(value) => parse_flag("USE_MOCK", &value)?,
                None => defaults.use_mock,
            },
            known_agents,
            max_reconnect_attempts: parse_or(
                &lookup,
                "MAX_RECONNECT_ATTEMPTS",
                defaults.max_reconnect_attempts,
            )?,
            approval_clear_policy: parse_or(
                &lookup,
                "APPROVAL_CLEAR_POLICY",
                defaults.approval_clear_policy,
            )?,
            mock_step_delay: parse_or(
                &lookup,
                "MOCK_STEP_DELAY_MS",
                defaults.mock_step_delay.as_millis() as u64,
            )
            .map(Duration::from_millis)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn mock_timing(&self) -> MockTiming {
        MockTiming::new(self.mock_step_delay)
    }

    pub fn is_known_agent(&self, name: &str) -> bool {
        self.known_agents.iter().any(|agent| agent == name)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> SyncResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| SyncError::ConfigError(format!("{} must be valid: {}", key, e))),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, value: &str) -> SyncResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(SyncError::ConfigError(format!(
            "{} must be a boolean, got {}",
            key, other
        ))),
    }
}
