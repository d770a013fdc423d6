//! # API Client
//!
//! URL construction, authentication headers and response mapping shared by
//! every API module.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ApiClient ─────────── products() reviews() press() blog() ...         │
//! │   │  session: Arc<SessionStore>   (bearer token source)                │
//! │   │                                                                     │
//! │   └─► RestClient ───── base URL + /api/v1/ + segments + query          │
//! │         │               X-Request-Id, Authorization: Bearer <token>    │
//! │         │                                                               │
//! │         └─► dyn HttpTransport                                          │
//! │                                                                         │
//! │  Response mapping                                                       │
//! │  ────────────────                                                       │
//! │  2xx            → decode JSON                                           │
//! │  non-2xx        → Api { status, body.message | body.error | fallback } │
//! │  no response    → Network / Timeout                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `SessionStore` talks to `RestClient` directly; everything else goes
//! through `ApiClient`, which looks up the token per call.

use bytes::Bytes;
use http::header::{HeaderValue, AUTHORIZATION};
use http::Method;
use hisi_core::{ApiEnvelope, QueryPairs};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;
use crate::storage::SessionStorage;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, HyperTransport};

/// Path prefix of every backend endpoint.
pub const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Correlation header attached to every request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const DEFAULT_FALLBACK: &str = "Request failed";

/// Picks the human-readable message out of an error body:
/// `message`, then `error`, then `fallback`.
pub fn extract_message(body: &[u8], fallback: &str) -> String {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return fallback.to_string(),
    };

    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

// =============================================================================
// Rest Client
// =============================================================================

/// Unauthenticated request plumbing: base URL plus transport.
#[derive(Clone)]
pub struct RestClient {
    base: Url,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient").field("base", &self.base.as_str()).finish()
    }
}

impl RestClient {
    pub fn new(base: Url, transport: Arc<dyn HttpTransport>) -> Self {
        Self { base, transport }
    }

    /// Builds a client with the production transport.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let transport = HyperTransport::new(config)?;
        Ok(Self::new(config.base_url()?, Arc::new(transport)))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `<base>/api/v1/<segments...>?<query>`; each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[String], query: &[(&'static str, String)]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base)))?;
            path.pop_if_empty();
            path.extend(API_PREFIX);
            path.extend(segments.iter().map(String::as_str));
        }

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder<'_> {
        RequestBuilder {
            rest: self,
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
            bearer: None,
            fallback: DEFAULT_FALLBACK.to_string(),
            error: None,
        }
    }
}

// =============================================================================
// Request Builder
// =============================================================================

/// One request under construction.
#[must_use = "a request does nothing until sent"]
pub struct RequestBuilder<'a> {
    rest: &'a RestClient,
    method: Method,
    segments: Vec<String>,
    query: QueryPairs,
    body: Option<Bytes>,
    bearer: Option<String>,
    fallback: String,
    error: Option<ClientError>,
}

impl<'a> RequestBuilder<'a> {
    /// Appends query pairs in order.
    pub fn query(mut self, pairs: QueryPairs) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// JSON body. Serialisation errors surface on `send`.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => self.body = Some(Bytes::from(bytes)),
            Err(e) => self.error = Some(ClientError::Decode(e.to_string())),
        }
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Message used when an error body carries neither `message` nor `error`.
    pub fn fallback(mut self, message: impl Into<String>) -> Self {
        self.fallback = message.into();
        self
    }

    /// Sends the request; non-2xx becomes `ClientError::Api`.
    pub async fn send(self) -> ClientResult<ApiResponse> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let url = self.rest.endpoint(&self.segments, &self.query)?;
        let request_id = Uuid::new_v4();

        let mut request = ApiRequest::new(self.method, url);
        request.body = self.body;

        let id_value = HeaderValue::from_str(&request_id.to_string())
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        request.headers.insert(REQUEST_ID_HEADER, id_value);

        let authenticated = self.bearer.is_some();
        if let Some(token) = self.bearer {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                warn!(%request_id, "Session token is not a valid header value");
                ClientError::AuthenticationRequired
            })?;
            request.headers.insert(AUTHORIZATION, value);
        }

        debug!(
            method = %request.method,
            url = %request.url,
            %request_id,
            authenticated,
            "Sending request"
        );

        let response = self.rest.transport.send(request).await?;

        if response.is_success() {
            return Ok(response);
        }

        let message = extract_message(&response.body, &self.fallback);
        debug!(%request_id, status = response.status, message = %message, "Backend rejected request");
        Err(ClientError::Api {
            status: response.status,
            message,
        })
    }

    /// Sends and decodes the whole body.
    pub async fn fetch<T: DeserializeOwned>(self) -> ClientResult<T> {
        self.send().await?.decode()
    }

    /// Sends and decodes the `data` field of a `{success, message, data}` envelope.
    pub async fn fetch_data<T: DeserializeOwned>(self) -> ClientResult<T> {
        let envelope: ApiEnvelope<T> = self.fetch().await?;
        Ok(envelope.data)
    }
}

// =============================================================================
// Api Client
// =============================================================================

/// Entry point for every backend resource.
///
/// Cheap to clone; the session store is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    rest: RestClient,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(rest: RestClient, session: Arc<SessionStore>) -> Self {
        Self { rest, session }
    }

    /// Production wiring: hyper transport, session hydrated from `storage`.
    pub fn connect(config: &ClientConfig, storage: Arc<dyn SessionStorage>) -> ClientResult<Self> {
        let rest = RestClient::from_config(config)?;
        let session = Arc::new(SessionStore::open(rest.clone(), storage));
        Ok(Self::new(rest, session))
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Request without credentials.
    pub fn public(&self, method: Method, segments: &[&str]) -> RequestBuilder<'_> {
        self.rest.request(method, segments)
    }

    /// Request carrying the session's bearer token.
    pub async fn authenticated(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder<'_>> {
        let token = self
            .session
            .token()
            .await
            .ok_or(ClientError::AuthenticationRequired)?;
        Ok(self.rest.request(method, segments).bearer(token))
    }
}
