//! Conversion of API failures into structured MCP errors.
use rmcp::model::ErrorData;
use serde_json::json;
use tracing::warn;

use crate::lib::errors::{
    ApiError, ToolErrorDescriptor, API_NOT_FOUND_ERROR, API_RATE_LIMITED_ERROR,
    API_REQUEST_FAILED_ERROR, API_RESPONSE_INVALID_ERROR, API_TOKEN_MISSING_ERROR,
    API_UNAUTHORIZED_ERROR, INVALID_ARGUMENT_ERROR,
};

/// Map an API failure to `ErrorData`, tagging it with the tool name.
pub fn api_error_to_error_data(err: ApiError, tool: &'static str) -> ErrorData {
    warn!(
        target: "mcp_digitalocean::tools",
        tool,
        error = %err,
        "Tool call failed"
    );

    let (descriptor, retryable, details) = match &err {
        ApiError::MissingToken => (&API_TOKEN_MISSING_ERROR, false, json!({})),
        ApiError::InvalidPath { path, .. } => (
            &INVALID_ARGUMENT_ERROR,
            false,
            json!({ "path": path, "reason": err.to_string() }),
        ),
        ApiError::Transport { .. } => (
            &API_REQUEST_FAILED_ERROR,
            true,
            json!({ "reason": err.to_string() }),
        ),
        ApiError::Status {
            status,
            id,
            message,
            request_id,
        } => {
            let (descriptor, retryable) = descriptor_for_status(*status);
            (
                descriptor,
                retryable,
                json!({
                    "status": status,
                    "id": id,
                    "message": message,
                    "request_id": request_id,
                }),
            )
        }
        ApiError::Decode { .. } => (
            &API_RESPONSE_INVALID_ERROR,
            false,
            json!({ "reason": err.to_string() }),
        ),
    };

    build(descriptor, retryable, details, tool)
}

/// Argument validation failure raised before any API call.
pub fn invalid_argument(field: &'static str, reason: &str) -> ErrorData {
    build(
        &INVALID_ARGUMENT_ERROR,
        false,
        json!({ "field": field, "reason": reason }),
        "",
    )
}

fn descriptor_for_status(status: u16) -> (&'static ToolErrorDescriptor, bool) {
    match status {
        401 | 403 => (&API_UNAUTHORIZED_ERROR, false),
        404 => (&API_NOT_FOUND_ERROR, false),
        429 => (&API_RATE_LIMITED_ERROR, true),
        500..=599 => (&API_REQUEST_FAILED_ERROR, status != 501),
        _ => (&API_REQUEST_FAILED_ERROR, false),
    }
}

fn build(
    descriptor: &ToolErrorDescriptor,
    retryable: bool,
    details: serde_json::Value,
    tool: &str,
) -> ErrorData {
    let mut builder = descriptor.builder().retryable(retryable).details(details);
    if !tool.is_empty() {
        builder = builder.with_context_field("tool", json!(tool));
    }
    builder
        .build()
        .unwrap_or_else(|err| ErrorData::internal_error(err.to_string(), None))
}
