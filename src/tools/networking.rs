//! Networking tools: domains, DNS records, and firewalls.
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorData},
    tool, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{api_error_to_error_data, json_result, path_segment, PageRequest, ServerToolRouter};
use crate::server::runtime::DigitalOceanServer;

pub const SERVICE_NAME: &str = "networking";

/// Input for `domain_record_list`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DomainRecordsRequest {
    /// Domain name, e.g. `example.com`.
    pub domain: String,
    #[serde(flatten)]
    pub page: PageRequest,
}

pub fn router() -> ServerToolRouter<DigitalOceanServer> {
    DigitalOceanServer::networking_router()
}

#[tool_router(router = networking_router)]
impl DigitalOceanServer {
    #[tool(name = "domain_list", description = "List domains managed by DigitalOcean DNS")]
    async fn domain_list(
        &self,
        Parameters(request): Parameters<PageRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = request.to_query()?;
        let body = self
            .api()
            .get("/v2/domains", &query)
            .await
            .map_err(|err| api_error_to_error_data(err, "domain_list"))?;
        json_result(body)
    }

    #[tool(name = "domain_record_list", description = "List DNS records for a domain")]
    async fn domain_record_list(
        &self,
        Parameters(request): Parameters<DomainRecordsRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let domain = path_segment("domain", &request.domain)?;
        let query = request.page.to_query()?;
        let body = self
            .api()
            .get(&format!("/v2/domains/{domain}/records"), &query)
            .await
            .map_err(|err| api_error_to_error_data(err, "domain_record_list"))?;
        json_result(body)
    }

    #[tool(name = "firewall_list", description = "List cloud firewalls and their rules")]
    async fn firewall_list(
        &self,
        Parameters(request): Parameters<PageRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = request.to_query()?;
        let body = self
            .api()
            .get("/v2/firewalls", &query)
            .await
            .map_err(|err| api_error_to_error_data(err, "firewall_list"))?;
        json_result(body)
    }
}
