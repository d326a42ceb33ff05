use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, HeaderMap};
use tokio::sync::Mutex;
use tracing::debug;

use crate::ClientError;
use crate::request::PreparedRequest;

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Raw HTTP exchange result handed back by a [`Transport`].
#[derive(Clone, Debug)]
pub struct RawResponse {
    /// Status code as received. Values that are not valid HTTP status codes
    /// are rejected by [`crate::ApiService`].
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Performs the network exchange for a [`PreparedRequest`].
///
/// Implement this to plug in another HTTP stack; [`ReqwestTransport`] is the
/// default. Cancellation is whatever the implementation does when its future
/// is dropped.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the raw response.
    fn execute(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<RawResponse, ClientError>> + Send;
}

/// Settings for [`ReqwestTransport`].
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// `User-Agent` header; GitHub rejects requests without one.
    pub user_agent: String,
    /// `Accept` header sent with every request.
    pub accept: String,
    /// Value of the `X-GitHub-Api-Version` header, omitted when `None`.
    pub api_version: Option<String>,
    /// Total timeout for one request.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
            accept: "application/vnd.github+json".to_owned(),
            api_version: Some("2022-11-28".to_owned()),
            timeout: Duration::from_secs(30),
        }
    }
}

/// [`Transport`] backed by an async `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    accept: String,
    api_version: Option<String>,
}

impl ReqwestTransport {
    /// Creates a transport with [`TransportConfig::default`].
    pub fn new() -> Result<Self, ClientError> {
        Self::from_config(&TransportConfig::default())
    }

    /// Creates a transport from explicit settings.
    pub fn from_config(config: &TransportConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            accept: config.accept.clone(),
            api_version: config.api_version.clone(),
        })
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, ClientError> {
        let mut builder = self
            .http
            .request(request.method.into(), request.url)
            .header(ACCEPT, self.accept.as_str());

        if let Some(version) = &self.api_version {
            builder = builder.header(API_VERSION_HEADER, version.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// [`Transport`] that answers every request with the same canned response.
///
/// Records each request it receives, which makes it suitable for testing
/// data sources without a network.
#[derive(Debug)]
pub struct MockTransport {
    status: u16,
    body: Bytes,
    calls: AtomicUsize,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl MockTransport {
    /// Creates a transport replying with `status` and `body`.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests executed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests executed so far, oldest first.
    pub async fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().await.clone()
    }

    /// Drains the recorded requests, oldest first. The call counter is kept.
    pub async fn take_requests(&self) -> Vec<PreparedRequest> {
        std::mem::take(&mut *self.requests.lock().await)
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(url = %request.url, status = self.status, "serving canned response");
        self.requests.lock().await.push(request);

        Ok(RawResponse {
            status: self.status,
            headers: HeaderMap::new(),
            body: self.body.clone(),
        })
    }
}
