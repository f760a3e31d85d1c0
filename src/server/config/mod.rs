//! Process-wide constants and the identity record shared by the client, server and telemetry.

pub mod telemetry;

/// Origin used when no API endpoint is configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.digitalocean.com";

const SERVER_NAME: &str = "mcp-digitalocean";

/// Name and version advertised to MCP clients and used in the API user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: &'static str,
    pub version: &'static str,
}

impl ServerIdentity {
    pub const fn new(name: &'static str, version: &'static str) -> Self {
        Self { name, version }
    }

    /// Identity of this build.
    pub const fn current() -> Self {
        Self::new(SERVER_NAME, env!("CARGO_PKG_VERSION"))
    }

    /// `<name>/<version>`, as sent in the `User-Agent` header.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self::current()
    }
}
