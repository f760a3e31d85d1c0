//! Authenticated DigitalOcean API client with bounded retry.
//!
//! Building a client never touches the network. A client built without a token is still usable
//! as a value; each request then fails with [`ApiError::MissingToken`] before anything is sent.

mod credential;
pub mod retry;

use std::time::Duration;

use reqwest::{header, Method, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

pub use credential::{normalize_token, ApiCredential};
pub use retry::RetryPolicy;

use crate::{
    lib::errors::{ApiError, ClientBuildError},
    server::config::ServerIdentity,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client bound to one API origin and one credential.
#[derive(Debug, Clone)]
pub struct DigitalOceanClient {
    http: reqwest::Client,
    base_url: Url,
    credential: ApiCredential,
    retry: RetryPolicy,
    user_agent: String,
}

/// Error body returned by the DigitalOcean API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    id: Option<String>,
    message: Option<String>,
    request_id: Option<String>,
}

impl DigitalOceanClient {
    /// Build a client with the default retry policy (4 retries, 1-30s backoff).
    pub fn build(
        credential: &ApiCredential,
        endpoint: &str,
        identity: &ServerIdentity,
    ) -> Result<Self, ClientBuildError> {
        Self::build_with_retry(credential, endpoint, identity, RetryPolicy::default())
    }

    pub fn build_with_retry(
        credential: &ApiCredential,
        endpoint: &str,
        identity: &ServerIdentity,
        retry: RetryPolicy,
    ) -> Result<Self, ClientBuildError> {
        let base_url = parse_base_url(endpoint)?;
        let user_agent = identity.user_agent();
        let http = reqwest::Client::builder()
            .user_agent(user_agent.clone())
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ClientBuildError::Http { source })?;

        debug!(
            target: "mcp_digitalocean::api",
            base_url = %base_url,
            user_agent = %user_agent,
            max_retries = retry.max_retries,
            token_present = !credential.is_missing(),
            "Built DigitalOcean API client"
        );

        Ok(Self {
            http,
            base_url,
            credential: credential.clone(),
            retry,
            user_agent,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn credential(&self) -> &ApiCredential {
        &self.credential
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.execute(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.execute(Method::POST, path, &[], Some(body)).await
    }

    /// Resolve an API path such as `/v2/droplets` against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ApiError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        if self.credential.is_missing() {
            return Err(ApiError::MissingToken);
        }
        let url = self.url_for(path)?;

        let mut attempt = 0;
        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .bearer_auth(self.credential.expose())
                .header(header::ACCEPT, "application/json")
                .header(header::CONTENT_TYPE, "application/json")
                .query(query);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(
                        target: "mcp_digitalocean::api",
                        method = %method,
                        path,
                        status = status.as_u16(),
                        attempt,
                        "DigitalOcean API response"
                    );
                    if status.is_success() {
                        return decode_body(response).await;
                    }
                    if retry::is_retryable_status(status) && self.retry.allows_retry(attempt) {
                        let hint = retry::retry_after(status, response.headers());
                        let wait = self.retry.wait_for(attempt, hint);
                        warn!(
                            target: "mcp_digitalocean::api",
                            method = %method,
                            path,
                            status = status.as_u16(),
                            attempt = attempt + 1,
                            wait_ms = wait.as_millis() as u64,
                            "Retrying DigitalOcean API request"
                        );
                        tokio::time::sleep(wait).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(status_error(response).await);
                }
                Err(err) => {
                    if retry::is_retryable_transport(&err) && self.retry.allows_retry(attempt) {
                        let wait = self.retry.backoff(attempt);
                        warn!(
                            target: "mcp_digitalocean::api",
                            method = %method,
                            path,
                            error = %err,
                            attempt = attempt + 1,
                            wait_ms = wait.as_millis() as u64,
                            "Retrying DigitalOcean API request after transport error"
                        );
                        tokio::time::sleep(wait).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(ApiError::Transport { source: err });
                }
            }
        }
    }
}

/// Parse the endpoint and make sure its path ends with `/` so joins keep any path prefix.
fn parse_base_url(endpoint: &str) -> Result<Url, ClientBuildError> {
    let mut url = Url::parse(endpoint).map_err(|source| ClientBuildError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ClientBuildError::NotABaseUrl {
            endpoint: endpoint.to_string(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn decode_body(response: Response) -> Result<Value, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|source| ApiError::Transport { source })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { source })
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let header_request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<ApiErrorBody>(&body).ok();

    let (id, message, request_id) = match parsed {
        Some(body) => (body.id, body.message, body.request_id),
        None => (None, None, None),
    };
    let message = message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    });

    ApiError::Status {
        status: status.as_u16(),
        id,
        message,
        request_id: request_id.or(header_request_id),
    }
}
