use crate::utils::error::{BigPandaError, Result};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use std::time::Duration;

pub(crate) const DEFAULT_API_BASE: &str = "https://api.bigpanda.io";
pub(crate) const DEFAULT_OIM_BASE: &str = "https://integrations.bigpanda.io/oim/api";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Client for the BigPanda resources API (maintenance plans, alert
/// enrichment). Authenticates with a Bearer API key.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
}

impl ApiClient {
    /// Client against the production BigPanda API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    /// Client against an alternative host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: HttpClient::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// How long to wait between enrichment job status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// URL under the Maintenance Plans v2.0 API.
    pub(crate) fn v2_0(&self, path: &str) -> String {
        format!("{}/resources/v2.0/{path}", self.base_url)
    }

    /// URL under the Alert Enrichment v2.1 API.
    pub(crate) fn v2_1(&self, path: &str) -> String {
        format!("{}/resources/v2.1/{path}", self.base_url)
    }

    pub(crate) fn auth(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.bearer_auth(&self.api_key)
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }
}

/// Client for the Open Integration Manager API. Authenticates with the org
/// token (the "Auth Token" in the BigPanda UI).
#[derive(Debug, Clone)]
pub struct OimClient {
    http: HttpClient,
    org_token: String,
    base_url: String,
}

impl OimClient {
    pub fn new(org_token: impl Into<String>) -> Self {
        Self::with_base_url(org_token, DEFAULT_OIM_BASE)
    }

    pub fn with_base_url(org_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: HttpClient::new(),
            org_token: org_token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    pub(crate) fn auth(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.bearer_auth(&self.org_token)
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }
}

/// Maps non-2xx responses to an API error carrying the response body as
/// detail.
pub(crate) async fn check_response(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let detail = resp.text().await.unwrap_or_default();
    Err(BigPandaError::Api { status, detail })
}
