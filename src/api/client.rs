//! api::client
//!
//! HTTP client for the SysML v2 Systems Modeling API.
//!
//! # Design
//!
//! Each method issues exactly one request to a fixed path and returns the
//! decoded JSON body. Remote entities are passed through as
//! [`serde_json::Value`]; the client never interprets their schema. There are
//! no retries, no caching, and no pagination handling.
//!
//! Works with any server implementing the SysML v2 REST API (the Flexo
//! SysML v2 layer, Gearshift, or the pilot implementation).

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use crate::core::config::ProjectConfig;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("sysml-cli/", env!("CARGO_PKG_VERSION"));

/// Client for a SysML v2 API server.
///
/// Owns one connection pool. Dropping the client (or calling
/// [`SysmlClient::close`]) releases it.
#[derive(Debug, Clone)]
pub struct SysmlClient {
    /// HTTP client for making requests
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
}

/// Body of `POST /projects`.
#[derive(Debug, Serialize)]
struct CreateProjectBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

/// Pull the error text out of a JSON error body: the `error` field, else
/// `message`. Strings are taken as-is; any other JSON value is rendered.
fn error_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(key))
        .find(|value| !value.is_null())
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
}

impl SysmlClient {
    /// Create a client for `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client for `base_url` with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client for the server URL in `config`.
    pub fn from_config(config: &ProjectConfig) -> Result<Self, ApiError> {
        Self::new(config.server_url())
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Release the underlying connection pool.
    pub fn close(self) {
        drop(self);
    }

    /// Build the absolute URL for `path` (which starts with `/`).
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Issue `GET /` and return the status code.
    ///
    /// # Errors
    ///
    /// Returns a transport error if no response was received.
    pub async fn ping(&self) -> Result<u16, ApiError> {
        let response = self.client.get(self.url("/")).send().await?;
        Ok(response.status().as_u16())
    }

    /// Return true if the server answered `GET /` with a non-5xx status.
    ///
    /// Never fails: transport errors count as unhealthy.
    pub async fn healthy(&self) -> bool {
        match self.ping().await {
            Ok(status) => status < 500,
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// List all projects on the server.
    pub async fn list_projects(&self) -> Result<Vec<Value>, ApiError> {
        self.get_json("/projects").await
    }

    /// Get a single project by ID.
    pub async fn get_project(&self, project_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/projects/{}", project_id)).await
    }

    /// Create a new project. An empty description is omitted from the body.
    pub async fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = CreateProjectBody {
            name,
            description: description.filter(|d| !d.is_empty()),
        };
        self.post_json("/projects", &body).await
    }

    // =========================================================================
    // Commits
    // =========================================================================

    /// List commits for a project.
    pub async fn list_commits(&self, project_id: &str) -> Result<Vec<Value>, ApiError> {
        self.get_json(&format!("/projects/{}/commits", project_id))
            .await
    }

    /// Get a single commit.
    pub async fn get_commit(&self, project_id: &str, commit_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/projects/{}/commits/{}", project_id, commit_id))
            .await
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// List all elements in a commit.
    pub async fn get_elements(
        &self,
        project_id: &str,
        commit_id: &str,
    ) -> Result<Vec<Value>, ApiError> {
        self.get_json(&format!(
            "/projects/{}/commits/{}/elements",
            project_id, commit_id
        ))
        .await
    }

    /// Get a single element by ID.
    pub async fn get_element(
        &self,
        project_id: &str,
        commit_id: &str,
        element_id: &str,
    ) -> Result<Value, ApiError> {
        self.get_json(&format!(
            "/projects/{}/commits/{}/elements/{}",
            project_id, commit_id, element_id
        ))
        .await
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Execute a query against a commit.
    ///
    /// `body` should conform to the SysML v2 Query schema, e.g.
    /// `{"@type": "Query", "select": [...], "where": {...}}`.
    pub async fn query(
        &self,
        project_id: &str,
        commit_id: &str,
        body: &Value,
    ) -> Result<Vec<Value>, ApiError> {
        self.post_json(
            &format!("/projects/{}/commits/{}/query", project_id, commit_id),
            body,
        )
        .await
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Submit model text to `POST /parse`.
    ///
    /// Returns `Ok(None)` when the server accepts the text (HTTP 200) and
    /// `Ok(Some(message))` when it rejects it. The message is the JSON
    /// `error` field, else the `message` field, else `HTTP <status>`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if no response was received.
    pub async fn parse(&self, text: &str) -> Result<Option<String>, ApiError> {
        let response = self
            .client
            .post(self.url("/parse"))
            .header(CONTENT_TYPE, "text/plain")
            .body(text.to_string())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(None);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        let message = if is_json {
            response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| error_message(&body))
        } else {
            None
        };

        Ok(Some(
            message.unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
        ))
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(path, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(path, response).await
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| error_message(&body))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(format!("{} ({})", path, message)),
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }
}
