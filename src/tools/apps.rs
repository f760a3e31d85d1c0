//! App Platform tools.
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorData},
    tool, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{api_error_to_error_data, json_result, path_segment, PageRequest, ServerToolRouter};
use crate::server::runtime::DigitalOceanServer;

pub const SERVICE_NAME: &str = "apps";

/// Input for `apps_get_info`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AppIdRequest {
    /// App ID (UUID).
    pub app_id: String,
}

pub fn router() -> ServerToolRouter<DigitalOceanServer> {
    DigitalOceanServer::apps_router()
}

#[tool_router(router = apps_router)]
impl DigitalOceanServer {
    #[tool(name = "apps_list", description = "List App Platform apps, one page at a time")]
    async fn apps_list(
        &self,
        Parameters(request): Parameters<PageRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = request.to_query()?;
        let body = self
            .api()
            .get("/v2/apps", &query)
            .await
            .map_err(|err| api_error_to_error_data(err, "apps_list"))?;
        json_result(body)
    }

    #[tool(
        name = "apps_get_info",
        description = "Get an App Platform app, including its spec and active deployment"
    )]
    async fn apps_get_info(
        &self,
        Parameters(request): Parameters<AppIdRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let app_id = path_segment("app_id", &request.app_id)?;
        let body = self
            .api()
            .get(&format!("/v2/apps/{app_id}"), &[])
            .await
            .map_err(|err| api_error_to_error_data(err, "apps_get_info"))?;
        json_result(body)
    }
}
