use crate::{server::config::ServerIdentity, tools::SERVICE_GROUPS};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(identity: &ServerIdentity, services: &[&str], token_present: bool) -> String {
    let services = if services.is_empty() {
        "none".to_string()
    } else {
        services
            .iter()
            .map(|name| describe_service(name))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut text = format!(
        "{name} {version} exposes DigitalOcean API tools for these services: {services}.",
        name = identity.name,
        version = identity.version,
    );
    if !token_present {
        text.push_str(
            " No API token is configured, so every tool call will fail until the server is restarted with DIGITALOCEAN_API_TOKEN set.",
        );
    }
    text
}

/// `name (description)` for catalogued services, the bare name otherwise.
fn describe_service(name: &str) -> String {
    SERVICE_GROUPS
        .iter()
        .find(|group| group.name == name)
        .map(|group| format!("{} ({})", group.name, group.description))
        .unwrap_or_else(|| name.to_string())
}
