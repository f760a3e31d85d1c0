//! CLI argument definitions and `ProcessConfiguration` construction.
use clap::Parser;

use super::ProcessConfiguration;

/// Command-line arguments. Each flag falls back to its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "DigitalOcean MCP server (stdio)",
    long_about = None
)]
pub struct LaunchArgs {
    /// Log level: debug, info, warn, error.
    #[arg(long = "log-level", env = "LOG_LEVEL")]
    pub log_level: Option<String>,
    /// Comma-separated list of services to activate (e.g., apps,networking,droplets).
    #[arg(long = "services", env = "SERVICES")]
    pub services: Option<String>,
    /// DigitalOcean API token.
    #[arg(
        long = "digitalocean-api-token",
        env = "DIGITALOCEAN_API_TOKEN",
        hide_env_values = true
    )]
    pub api_token: Option<String>,
    /// DigitalOcean API endpoint.
    #[arg(long = "digitalocean-api-endpoint", env = "DIGITALOCEAN_API_ENDPOINT")]
    pub api_endpoint: Option<String>,
}

impl LaunchArgs {
    /// Resolve flags and environment into the canonical configuration. Never fails.
    pub fn resolve(self) -> ProcessConfiguration {
        ProcessConfiguration::new(
            self.log_level.as_deref().unwrap_or_default(),
            self.services.as_deref().unwrap_or_default(),
            self.api_token.as_deref().unwrap_or_default(),
            self.api_endpoint.as_deref().unwrap_or_default(),
        )
    }
}
