//! MCP tool groups, one module per service, and the registry that activates them.

pub mod account;
pub mod apps;
pub mod droplets;
pub mod errors;
pub mod networking;
pub mod registry;

use rmcp::{
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Content, ErrorData},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

pub use errors::{api_error_to_error_data, invalid_argument};
pub use registry::{available_services, register, select_groups, ServiceGroup, SERVICE_GROUPS};

pub type ServerToolRouter<S> = ToolRouter<S>;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 20;
const MAX_PER_PAGE: u32 = 200;

/// Pagination arguments shared by list tools.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PageRequest {
    /// Page number, starting at 1 (default 1).
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page, 1-200 (default 20).
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PageRequest {
    /// Validate and render as `page` / `per_page` query parameters.
    pub fn to_query(&self) -> Result<Vec<(&'static str, String)>, ErrorData> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        if page == 0 {
            return Err(invalid_argument("page", "page numbers start at 1"));
        }
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(invalid_argument(
                "per_page",
                "per_page must be between 1 and 200",
            ));
        }
        Ok(vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ])
    }
}

/// Reject identifiers that would change the request path.
///
/// URL parsing resolves `.`/`..` segments, treats `\` as `/`, and decodes `%2e`, so all of
/// those are refused along with the plain separators.
pub(crate) fn path_segment<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ErrorData> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid_argument(field, "value must not be empty"));
    }
    if trimmed.contains(['/', '\\', '?', '#', '%']) {
        return Err(invalid_argument(
            field,
            "value must not contain '/', '\\', '?', '#' or '%'",
        ));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(invalid_argument(field, "value must not be a dot segment"));
    }
    Ok(trimmed)
}

/// Wrap an API response body as JSON tool content.
pub(crate) fn json_result(body: Value) -> Result<CallToolResult, ErrorData> {
    Ok(CallToolResult::success(vec![Content::json(body)?]))
}
