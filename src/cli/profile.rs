//! `ProcessConfiguration` and the resolution rules for each setting.
use tracing::level_filters::LevelFilter;

use crate::{lib::digitalocean::ApiCredential, server::config::DEFAULT_API_ENDPOINT};

/// Log verbosity accepted by `--log-level` / `LOG_LEVEL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Case-insensitive match with `warning` as an alias of `warn`.
    /// Unknown or empty input falls back to `info`.
    pub fn resolve(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub const fn as_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Canonical process configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct ProcessConfiguration {
    pub log_level: LogLevel,
    /// Empty means every available service.
    pub requested_services: Vec<String>,
    pub credential: ApiCredential,
    pub endpoint: String,
}

impl ProcessConfiguration {
    pub fn new(log_level: &str, services: &str, token: &str, endpoint: &str) -> Self {
        Self {
            log_level: LogLevel::resolve(log_level),
            requested_services: split_services(services),
            credential: ApiCredential::new(token),
            endpoint: resolve_endpoint(endpoint),
        }
    }
}

/// Split on `,` without trimming or de-duplicating entries.
pub fn split_services(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

/// Substitute the default origin only for an empty value.
pub fn resolve_endpoint(raw: &str) -> String {
    if raw.is_empty() {
        return DEFAULT_API_ENDPOINT.to_string();
    }
    raw.to_string()
}
