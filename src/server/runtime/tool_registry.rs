use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::{Implementation, ServerCapabilities, ServerInfo, Tool},
    tool_handler,
};

use crate::{
    lib::digitalocean::DigitalOceanClient,
    server::{config::ServerIdentity, runtime::build_instructions},
    tools::ServerToolRouter,
};

/// MCP server instance. Starts with no tools; the service registry merges tool groups in.
#[derive(Clone)]
pub struct DigitalOceanServer {
    identity: ServerIdentity,
    client: Arc<DigitalOceanClient>,
    tool_router: ServerToolRouter<Self>,
    services: Vec<&'static str>,
}

impl DigitalOceanServer {
    pub fn new(identity: ServerIdentity, client: Arc<DigitalOceanClient>) -> Self {
        Self {
            identity,
            client,
            tool_router: ServerToolRouter::new(),
            services: Vec::new(),
        }
    }

    /// Shared API client used by every tool.
    pub fn api(&self) -> &DigitalOceanClient {
        &self.client
    }

    /// Service groups registered so far, in registration order.
    pub fn active_services(&self) -> &[&'static str] {
        &self.services
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Registered tool names, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }

    pub(crate) fn register_group(&mut self, service: &'static str, router: ServerToolRouter<Self>) {
        self.tool_router.merge(router);
        self.services.push(service);
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DigitalOceanServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.identity.name.to_string(),
                version: self.identity.version.to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(build_instructions(
                &self.identity,
                &self.services,
                !self.client.credential().is_missing(),
            )),
            ..ServerInfo::default()
        }
    }
}
