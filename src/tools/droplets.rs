//! Droplet tools.
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorData},
    tool, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{api_error_to_error_data, json_result, PageRequest, ServerToolRouter};
use crate::server::runtime::DigitalOceanServer;

pub const SERVICE_NAME: &str = "droplets";

/// Input for `droplet_get`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DropletIdRequest {
    /// Numeric Droplet ID.
    pub droplet_id: u64,
}

/// Power actions accepted by `droplet_action`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DropletActionKind {
    Reboot,
    PowerCycle,
    PowerOn,
    PowerOff,
    Shutdown,
}

impl DropletActionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DropletActionKind::Reboot => "reboot",
            DropletActionKind::PowerCycle => "power_cycle",
            DropletActionKind::PowerOn => "power_on",
            DropletActionKind::PowerOff => "power_off",
            DropletActionKind::Shutdown => "shutdown",
        }
    }
}

/// Input for `droplet_action`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DropletActionRequest {
    /// Numeric Droplet ID.
    pub droplet_id: u64,
    pub action: DropletActionKind,
}

pub fn router() -> ServerToolRouter<DigitalOceanServer> {
    DigitalOceanServer::droplets_router()
}

#[tool_router(router = droplets_router)]
impl DigitalOceanServer {
    #[tool(name = "droplet_list", description = "List Droplets in the account, one page at a time")]
    async fn droplet_list(
        &self,
        Parameters(request): Parameters<PageRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = request.to_query()?;
        let body = self
            .api()
            .get("/v2/droplets", &query)
            .await
            .map_err(|err| api_error_to_error_data(err, "droplet_list"))?;
        json_result(body)
    }

    #[tool(name = "droplet_get", description = "Get a Droplet by its numeric ID")]
    async fn droplet_get(
        &self,
        Parameters(request): Parameters<DropletIdRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .api()
            .get(&format!("/v2/droplets/{}", request.droplet_id), &[])
            .await
            .map_err(|err| api_error_to_error_data(err, "droplet_get"))?;
        json_result(body)
    }

    #[tool(
        name = "droplet_action",
        description = "Run a power action (reboot, power_cycle, power_on, power_off, shutdown) on a Droplet"
    )]
    async fn droplet_action(
        &self,
        Parameters(request): Parameters<DropletActionRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .api()
            .post(
                &format!("/v2/droplets/{}/actions", request.droplet_id),
                &json!({ "type": request.action.as_str() }),
            )
            .await
            .map_err(|err| api_error_to_error_data(err, "droplet_action"))?;
        json_result(body)
    }
}
