//! Account tools.
use rmcp::{model::CallToolResult, model::ErrorData, tool, tool_router};

use super::{api_error_to_error_data, json_result, ServerToolRouter};
use crate::server::runtime::DigitalOceanServer;

pub const SERVICE_NAME: &str = "account";

pub fn router() -> ServerToolRouter<DigitalOceanServer> {
    DigitalOceanServer::account_router()
}

#[tool_router(router = account_router)]
impl DigitalOceanServer {
    #[tool(
        name = "account_get_information",
        description = "Get the DigitalOcean account profile: email, status, and resource limits"
    )]
    async fn account_get_information(&self) -> Result<CallToolResult, ErrorData> {
        let body = self
            .api()
            .get("/v2/account", &[])
            .await
            .map_err(|err| api_error_to_error_data(err, "account_get_information"))?;
        json_result(body)
    }

    #[tool(
        name = "balance_get",
        description = "Get the current month-to-date balance and usage for the account"
    )]
    async fn balance_get(&self) -> Result<CallToolResult, ErrorData> {
        let body = self
            .api()
            .get("/v2/customers/my/balance", &[])
            .await
            .map_err(|err| api_error_to_error_data(err, "balance_get"))?;
        json_result(body)
    }
}
