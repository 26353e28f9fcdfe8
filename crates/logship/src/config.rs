// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::errors::ConfigError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_LEVEL: &str = "info";
const DEFAULT_MAX_RETRIES: u32 = 10;
const DEFAULT_RETRY_DELAY_MS: u64 = 10_000;
const DEFAULT_CONCURRENCY: usize = 25;
const DEFAULT_MAX_PER_SECOND: usize = 10;

/// Process-wide shipper configuration. Set once at construction, immutable
/// thereafter (the [`crate::Logger`] keeps it behind an `Arc`).
#[derive(Debug, Clone)]
pub struct ShipperConfig {
    /// Remote ingestion endpoint; the only validated setting
    pub endpoint_url: String,
    /// Tags attached to every event
    pub tags: Vec<String>,
    /// Recorded default level; all levels are currently accepted
    pub default_level: String,
    /// Extra delivery attempts after the first failed one
    pub max_retries: u32,
    /// Fixed delay between attempts (constant, not exponential)
    pub retry_delay: Duration,
    /// Max simultaneous in-flight sends
    pub concurrency: usize,
    /// Max task starts within any rolling 1000 ms window
    pub max_messages_per_second: usize,
    /// Suppress the local console echo
    pub mute_console: bool,
}

impl ShipperConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            tags: Vec::new(),
            default_level: DEFAULT_LEVEL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            concurrency: DEFAULT_CONCURRENCY,
            max_messages_per_second: DEFAULT_MAX_PER_SECOND,
            mute_console: false,
        }
    }

    /// Create configuration from `LOGSHIP_*` environment variables.
    /// Unparseable numeric values fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(env::var("LOGSHIP_URL").unwrap_or_default());

        if let Ok(tags) = env::var("LOGSHIP_TAGS") {
            config.tags = parse_tag_list(&tags);
        }
        if let Ok(level) = env::var("LOGSHIP_LEVEL") {
            config.default_level = level.to_lowercase();
        }
        if let Some(max_retries) = env_parse("LOGSHIP_MAX_RETRIES") {
            config.max_retries = max_retries;
        }
        if let Some(delay_ms) = env_parse("LOGSHIP_RETRY_DELAY_MS") {
            config.retry_delay = Duration::from_millis(delay_ms);
        }
        if let Some(concurrency) = env_parse("LOGSHIP_CONCURRENCY") {
            config.concurrency = concurrency;
        }
        if let Some(per_second) = env_parse("LOGSHIP_MAX_PER_SECOND") {
            config.max_messages_per_second = per_second;
        }
        config.mute_console = env::var("LOGSHIP_MUTE_CONSOLE")
            .map(|val| val.to_lowercase() == "true")
            .unwrap_or(false);

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration. The endpoint URL is the only setting
    /// checked here; degenerate numeric values (zero concurrency, zero
    /// rate) are accepted and stall admission without crashing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "endpoint URL must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|val| val.parse::<T>().ok())
}

/// Space-separated tags are the standard; comma-separated tags are accepted
/// as well for compatibility.
fn parse_tag_list(raw: &str) -> Vec<String> {
    let normalized = raw.replace(',', " ");
    normalized
        .split_whitespace()
        .map(|tag| tag.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = ShipperConfig::new("https://logs.example.com/ingest");
        assert!(config.tags.is_empty());
        assert_eq!(config.default_level, "info");
        assert_eq!(config.max_retries, 10);
        assert_eq!(config.retry_delay, Duration::from_secs(10));
        assert_eq!(config.concurrency, 25);
        assert_eq!(config.max_messages_per_second, 10);
        assert!(!config.mute_console);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_url() {
        assert!(ShipperConfig::new("").validate().is_err());
        assert!(ShipperConfig::new("   ").validate().is_err());
    }

    #[test]
    fn test_parse_tag_list_separators() {
        assert_eq!(
            parse_tag_list("env:prod,service:checkout"),
            vec!["env:prod".to_string(), "service:checkout".to_string()]
        );
        assert_eq!(
            parse_tag_list("env:prod service:checkout"),
            vec!["env:prod".to_string(), "service:checkout".to_string()]
        );
        assert_eq!(parse_tag_list(" , , "), Vec::<String>::new());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_url() {
        env::remove_var("LOGSHIP_URL");
        let config = ShipperConfig::from_env();
        assert!(config.is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_settings() {
        env::set_var("LOGSHIP_URL", "https://logs.example.com/ingest");
        env::set_var("LOGSHIP_TAGS", "env:test,region:eu");
        env::set_var("LOGSHIP_LEVEL", "DEBUG");
        env::set_var("LOGSHIP_MAX_RETRIES", "3");
        env::set_var("LOGSHIP_RETRY_DELAY_MS", "250");
        env::set_var("LOGSHIP_CONCURRENCY", "4");
        env::set_var("LOGSHIP_MAX_PER_SECOND", "2");
        env::set_var("LOGSHIP_MUTE_CONSOLE", "TRUE");

        let config = ShipperConfig::from_env().expect("config should build");
        assert_eq!(config.endpoint_url, "https://logs.example.com/ingest");
        assert_eq!(config.tags, vec!["env:test", "region:eu"]);
        assert_eq!(config.default_level, "debug");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, Duration::from_millis(250));
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.max_messages_per_second, 2);
        assert!(config.mute_console);

        for var in [
            "LOGSHIP_URL",
            "LOGSHIP_TAGS",
            "LOGSHIP_LEVEL",
            "LOGSHIP_MAX_RETRIES",
            "LOGSHIP_RETRY_DELAY_MS",
            "LOGSHIP_CONCURRENCY",
            "LOGSHIP_MAX_PER_SECOND",
            "LOGSHIP_MUTE_CONSOLE",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_unparseable_values_fall_back() {
        env::set_var("LOGSHIP_URL", "https://logs.example.com/ingest");
        env::set_var("LOGSHIP_MAX_RETRIES", "not-a-number");
        env::set_var("LOGSHIP_CONCURRENCY", "-5");

        let config = ShipperConfig::from_env().expect("config should build");
        assert_eq!(config.max_retries, 10);
        assert_eq!(config.concurrency, 25);

        env::remove_var("LOGSHIP_URL");
        env::remove_var("LOGSHIP_MAX_RETRIES");
        env::remove_var("LOGSHIP_CONCURRENCY");
    }
}
