//! # HTTP Transport
//!
//! The seam between the client and the wire.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One Backend Request                              │
//! │                                                                         │
//! │  ┌────────────┐   ApiRequest    ┌────────────────┐                     │
//! │  │ RestClient │ ──────────────► │ HttpTransport  │                     │
//! │  └────────────┘                 └───────┬────────┘                     │
//! │        ▲                                │                               │
//! │        │                  ┌─────────────┴─────────────┐                │
//! │        │                  ▼                           ▼                 │
//! │        │         ┌────────────────┐          ┌────────────────┐        │
//! │        │         │ HyperTransport │          │ ScriptedTransport│      │
//! │        │         │ (hyper + TLS)  │          │ (tests only)   │        │
//! │        │         └───────┬────────┘          └────────────────┘        │
//! │        │                 │                                              │
//! │        │     timeout ────┼──── Timeout(secs)                           │
//! │        │     io/dns  ────┼──── Network(reason)                         │
//! │        │                 ▼                                              │
//! │        └──────────── ApiResponse { status, body }                      │
//! │                                                                         │
//! │  Any HTTP status is a successful transport round trip; status           │
//! │  interpretation belongs to RestClient.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::Method;
use http_body_util::{BodyExt, Full};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Request / Response
// =============================================================================

/// A fully built request, ready for the wire.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Header value as text, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parses the body as JSON (tests inspect what was sent).
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

/// Raw response: status plus the collected body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Convenience for building a JSON response.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body; an empty body decodes as JSON `null`.
    pub fn decode<T: DeserializeOwned>(&self) -> ClientResult<T> {
        if self.body.is_empty() {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// Sends one request and returns whatever the server answered.
///
/// Implementations return `Err` only when no HTTP response was obtained.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

// =============================================================================
// Hyper Transport
// =============================================================================

/// Production transport: pooled hyper client with HTTPS support.
pub struct HyperTransport {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    timeout: Duration,
    user_agent: HeaderValue,
}

impl HyperTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let user_agent = HeaderValue::from_str(&config.api.user_agent)
            .map_err(|e| ClientError::InvalidConfig(format!("user_agent: {}", e)))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpsConnector::new());

        Ok(Self {
            client,
            timeout: config.request_timeout(),
            user_agent,
        })
    }

    async fn round_trip(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let mut builder = http::Request::builder()
            .method(request.method)
            .uri(request.url.as_str())
            .header(USER_AGENT, self.user_agent.clone())
            .header(ACCEPT, "application/json");

        if request.body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        if let Some(headers) = builder.headers_mut() {
            headers.extend(request.headers);
        }

        let http_request = builder.body(Full::new(request.body.unwrap_or_default()))?;

        let response = self
            .client
            .request(http_request)
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?
            .to_bytes();

        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for HyperTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = request.url.clone();

        match tokio::time::timeout(self.timeout, self.round_trip(request)).await {
            Ok(Ok(response)) => {
                debug!(%url, status = response.status, bytes = response.body.len(), "Response received");
                Ok(response)
            }
            Ok(Err(e)) => {
                warn!(%url, error = %e, "Request failed");
                Err(e)
            }
            Err(_) => {
                warn!(%url, timeout_secs = self.timeout.as_secs(), "Request timed out");
                Err(ClientError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}
