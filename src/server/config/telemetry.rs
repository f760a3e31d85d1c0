use tracing::{debug, warn};

use super::{ServerIdentity, DEFAULT_API_ENDPOINT};
use crate::cli::ProcessConfiguration;

pub fn log_resolved(config: &ProcessConfiguration, identity: &ServerIdentity) {
    debug!(
        target: "mcp_digitalocean::config",
        name = identity.name,
        version = identity.version,
        log_level = config.log_level.as_str(),
        services = ?config.requested_services,
        endpoint = %config.endpoint,
        default_endpoint = config.endpoint == DEFAULT_API_ENDPOINT,
        token_present = !config.credential.is_missing(),
        "Resolved process configuration"
    );
}

/// Emit the degraded-start warning when no API token was supplied.
pub fn warn_missing_token() {
    warn!(
        target: "mcp_digitalocean::config",
        "DigitalOcean API token not provided. Server will start but API calls will fail until token is available. Use --digitalocean-api-token flag or set DIGITALOCEAN_API_TOKEN environment variable"
    );
}
