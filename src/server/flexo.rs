//! server::flexo
//!
//! Post-start bootstrap for the Flexo backend.
//!
//! # Sequence
//!
//! 1. Wait for the Flexo MMS layer-1 service to answer `GET /`.
//! 2. Create the `sysmlv2` organization with a Turtle `PUT`.
//! 3. Wait for the SysML v2 API to answer `GET /projects`.
//!
//! Every step is bounded by a [`PollPolicy`] and reports its result instead
//! of failing: a slow container start is not an error for `serve up`.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

use crate::api::ApiError;
use crate::core::config::ProjectConfig;

/// Organization the SysML v2 layer stores its projects under.
pub const ORG_ID: &str = "sysmlv2";

/// Per-request timeout while polling.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Turtle body for the organization `PUT`.
const ORG_TURTLE: &str = concat!(
    "@prefix dct: <http://purl.org/dc/terms/> .\n",
    "\n",
    "<> dct:title \"SysML v2\"@en .\n",
);

/// Bounds for readiness polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Maximum number of probes
    pub attempts: u32,
    /// Delay between probes
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            attempts: 30,
            interval: Duration::from_secs(2),
        }
    }
}

impl PollPolicy {
    /// Probe with `check` until it returns true or attempts run out.
    pub async fn poll<F, Fut>(&self, mut check: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        for attempt in 1..=self.attempts {
            if check().await {
                return true;
            }
            tracing::debug!(attempt, attempts = self.attempts, "not ready yet");
            if attempt < self.attempts {
                tokio::time::sleep(self.interval).await;
            }
        }
        false
    }
}

/// Result of the organization `PUT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgStatus {
    Created,
    AlreadyExists,
    /// Any other response, or no response at all
    Failed(String),
}

/// What the bootstrap achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    /// Layer 1 answered within the poll bounds
    pub layer1_ready: bool,
    /// Organization result; `None` when layer 1 never came up
    pub org: Option<OrgStatus>,
    /// The SysML v2 API answered `GET /projects` within the poll bounds
    pub api_ready: bool,
}

/// Bootstraps a freshly started Flexo stack.
#[derive(Debug, Clone)]
pub struct FlexoBootstrap {
    client: Client,
    flexo_url: String,
    token: String,
    api_url: String,
    policy: PollPolicy,
}

impl FlexoBootstrap {
    /// Create a bootstrap for layer 1 at `flexo_url` and the API at `api_url`.
    pub fn new(flexo_url: &str, token: &str, api_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            flexo_url: flexo_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            policy: PollPolicy::default(),
        })
    }

    /// Create a bootstrap from the `[server]` settings.
    pub fn from_config(config: &ProjectConfig) -> Result<Self, ApiError> {
        Self::new(config.flexo_url(), config.flexo_token(), config.server_url())
    }

    /// Replace the polling bounds.
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Wait until layer 1 answers `GET /` with a non-5xx status.
    pub async fn wait_for_layer1(&self) -> bool {
        let url = format!("{}/", self.flexo_url);
        let (client, url) = (&self.client, &url);
        self.policy
            .poll(|| async move {
                match client.get(url).send().await {
                    Ok(response) => !response.status().is_server_error(),
                    Err(_) => false,
                }
            })
            .await
    }

    /// Create the `sysmlv2` organization.
    pub async fn ensure_org(&self) -> OrgStatus {
        let url = format!("{}/orgs/{}", self.flexo_url, ORG_ID);
        let result = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, "text/turtle")
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .body(ORG_TURTLE)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => return OrgStatus::Failed(ApiError::from(e).to_string()),
        };

        let status = response.status();
        if status.is_success() {
            return OrgStatus::Created;
        }
        if matches!(status, StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED) {
            return OrgStatus::AlreadyExists;
        }

        let body = response.text().await.unwrap_or_default();
        if body.to_lowercase().contains("already exists") {
            return OrgStatus::AlreadyExists;
        }

        let detail = body.trim();
        OrgStatus::Failed(if detail.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            format!("HTTP {}: {}", status.as_u16(), detail)
        })
    }

    /// Wait until the API answers `GET /projects` with a 2xx status.
    pub async fn wait_for_api(&self) -> bool {
        let url = format!("{}/projects", self.api_url);
        let (client, url) = (&self.client, &url);
        self.policy
            .poll(|| async move {
                match client.get(url).send().await {
                    Ok(response) => response.status().is_success(),
                    Err(_) => false,
                }
            })
            .await
    }

    /// Run all three steps. Organization creation and the API wait are
    /// skipped when layer 1 never becomes ready.
    pub async fn run(&self) -> BootstrapOutcome {
        tracing::debug!(flexo = %self.flexo_url, api = %self.api_url, "bootstrapping flexo");

        if !self.wait_for_layer1().await {
            return BootstrapOutcome {
                layer1_ready: false,
                org: None,
                api_ready: false,
            };
        }

        let org = self.ensure_org().await;
        let api_ready = self.wait_for_api().await;

        BootstrapOutcome {
            layer1_ready: true,
            org: Some(org),
            api_ready,
        }
    }
}
