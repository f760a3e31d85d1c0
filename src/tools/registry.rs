//! Service catalog and selective registration of tool groups.
use tracing::{debug, info};

use super::{account, apps, droplets, networking, ServerToolRouter};
use crate::{lib::errors::RegistryError, server::runtime::DigitalOceanServer};

/// A named group of tools that can be activated with `--services`.
pub struct ServiceGroup {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> ServerToolRouter<DigitalOceanServer>,
}

impl ServiceGroup {
    pub fn router(&self) -> ServerToolRouter<DigitalOceanServer> {
        (self.build)()
    }
}

/// Every service this server knows, in registration order.
pub static SERVICE_GROUPS: [ServiceGroup; 4] = [
    ServiceGroup {
        name: account::SERVICE_NAME,
        description: "Account information and billing balance",
        build: account::router,
    },
    ServiceGroup {
        name: apps::SERVICE_NAME,
        description: "App Platform applications",
        build: apps::router,
    },
    ServiceGroup {
        name: droplets::SERVICE_NAME,
        description: "Droplet inventory and power actions",
        build: droplets::router,
    },
    ServiceGroup {
        name: networking::SERVICE_NAME,
        description: "Domains, DNS records and firewalls",
        build: networking::router,
    },
];

pub fn available_services() -> Vec<&'static str> {
    SERVICE_GROUPS.iter().map(|group| group.name).collect()
}

/// Resolve requested names to service groups.
///
/// Names match exactly and case-sensitively. No names selects every group. Repeated names
/// select a group once, at its first position.
pub fn select_groups(requested: &[String]) -> Result<Vec<&'static ServiceGroup>, RegistryError> {
    if requested.is_empty() {
        return Ok(SERVICE_GROUPS.iter().collect());
    }

    let mut selected: Vec<&'static ServiceGroup> = Vec::with_capacity(requested.len());
    for name in requested {
        let group = SERVICE_GROUPS
            .iter()
            .find(|group| group.name == name.as_str())
            .ok_or_else(|| RegistryError::UnknownService {
                name: name.clone(),
                available: available_services(),
            })?;
        if !selected.iter().any(|existing| existing.name == group.name) {
            selected.push(group);
        }
    }
    Ok(selected)
}

/// Register the tool groups for `requested` on `server`.
///
/// Selection happens before any registration, so an unknown name leaves the server untouched.
pub fn register(server: &mut DigitalOceanServer, requested: &[String]) -> Result<(), RegistryError> {
    let groups = select_groups(requested)?;
    debug!(
        target: "mcp_digitalocean::registry",
        requested = ?requested,
        unconstrained = requested.is_empty(),
        "Selected services"
    );

    for group in groups {
        let router = group.router();
        let tool_count = router.list_all().len();
        server.register_group(group.name, router);
        info!(
            target: "mcp_digitalocean::registry",
            service = group.name,
            tool_count,
            "Registered service tools"
        );
    }
    Ok(())
}
