use rmcp::model::ErrorData;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while constructing the DigitalOcean API client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The endpoint does not parse as an absolute URL.
    #[error("invalid API endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    /// The endpoint parses but cannot carry request paths (e.g. `mailto:`).
    #[error("API endpoint `{endpoint}` cannot be used as a base URL")]
    NotABaseUrl { endpoint: String },
    /// The HTTP client itself failed to build.
    #[error("failed to build HTTP client: {source}")]
    Http {
        #[source]
        source: reqwest::Error,
    },
}

/// Failures of individual DigitalOcean API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("DigitalOcean API token is not configured")]
    MissingToken,
    #[error("invalid request path `{path}`: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to DigitalOcean API failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("DigitalOcean API returned {status}: {message}")]
    Status {
        status: u16,
        id: Option<String>,
        message: String,
        request_id: Option<String>,
    },
    #[error("failed to decode DigitalOcean API response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors returned by the service registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown service: {name} (available: {})", .available.join(", "))]
    UnknownService {
        name: String,
        available: Vec<&'static str>,
    },
}

/// JSON-RPC error class used for a tool error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    InvalidParams,
    Internal,
}

/// Structured error metadata returned by MCP tools.
#[derive(Debug, Clone, Serialize)]
pub struct ToolErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// User-facing message.
    pub message: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
    pub class: ErrorClass,
}

impl ToolErrorDescriptor {
    pub const fn new(
        code: &'static str,
        message: &'static str,
        remediation: &'static str,
        class: ErrorClass,
    ) -> Self {
        Self {
            code,
            message,
            remediation,
            class,
        }
    }

    /// Create a builder.
    pub fn builder(&self) -> ToolErrorDescriptorBuilder<'_> {
        ToolErrorDescriptorBuilder::new(self)
    }
}

/// Builder for error data that fails if required fields are missing.
pub struct ToolErrorDescriptorBuilder<'a> {
    descriptor: &'a ToolErrorDescriptor,
    retryable: Option<bool>,
    details: Option<Value>,
    extra_fields: Map<String, Value>,
}

impl<'a> ToolErrorDescriptorBuilder<'a> {
    pub fn new(descriptor: &'a ToolErrorDescriptor) -> Self {
        Self {
            descriptor,
            retryable: None,
            details: None,
            extra_fields: Map::new(),
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_context_field(mut self, key: &str, value: Value) -> Self {
        self.extra_fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Result<ErrorData, ToolErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ToolErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let retryable = self
            .retryable
            .ok_or(ToolErrorBuilderError::MissingRetryable {
                code: self.descriptor.code,
            })?;

        let mut data = Map::new();
        data.insert("code".into(), Value::String(self.descriptor.code.into()));
        data.insert(
            "remediation".into(),
            Value::String(self.descriptor.remediation.into()),
        );
        data.insert("retryable".into(), Value::Bool(retryable));
        if let Some(details) = self.details {
            data.insert("details".into(), details);
        }
        for (key, value) in self.extra_fields {
            data.insert(key, value);
        }

        let data = Some(Value::Object(data));
        Ok(match self.descriptor.class {
            ErrorClass::InvalidParams => ErrorData::invalid_params(self.descriptor.message, data),
            ErrorClass::Internal => ErrorData::internal_error(self.descriptor.message, data),
        })
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolErrorBuilderError {
    #[error("retryable is missing (code={code})")]
    MissingRetryable { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}

/// Tool invoked while the server runs without an API token.
pub const API_TOKEN_MISSING_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "API_TOKEN_MISSING",
    "DigitalOcean API token is not configured",
    "Set DIGITALOCEAN_API_TOKEN or pass --digitalocean-api-token, then restart the server.",
    ErrorClass::InvalidParams,
);

/// 401/403 from the API.
pub const API_UNAUTHORIZED_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "API_UNAUTHORIZED",
    "DigitalOcean rejected the API token",
    "Check that the token is valid, not expired, and has the scopes this tool needs.",
    ErrorClass::Internal,
);

/// 404 from the API.
pub const API_NOT_FOUND_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "API_NOT_FOUND",
    "The requested DigitalOcean resource was not found",
    "Verify the resource identifier, for example by listing resources first.",
    ErrorClass::InvalidParams,
);

/// 429 from the API after retries were exhausted.
pub const API_RATE_LIMITED_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "API_RATE_LIMITED",
    "DigitalOcean API rate limit exceeded",
    "Wait before retrying, or reduce the number of concurrent requests.",
    ErrorClass::Internal,
);

/// Any other API or transport failure.
pub const API_REQUEST_FAILED_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "API_REQUEST_FAILED",
    "DigitalOcean API request failed",
    "Check connectivity to the configured API endpoint and retry.",
    ErrorClass::Internal,
);

/// Response body could not be decoded.
pub const API_RESPONSE_INVALID_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "API_RESPONSE_INVALID",
    "DigitalOcean API returned an unreadable response",
    "Confirm the API endpoint points at the DigitalOcean v2 API.",
    ErrorClass::Internal,
);

/// Tool arguments failed validation before any API call.
pub const INVALID_ARGUMENT_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "INVALID_ARGUMENT",
    "Tool arguments are invalid",
    "Fix the argument named in details and call the tool again.",
    ErrorClass::InvalidParams,
);
