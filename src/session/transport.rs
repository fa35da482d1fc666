//! HTTP transport seam.
//!
//! The gateway and session manager are written against [`HttpTransport`]
//! so the whole token lifecycle can be exercised by tests with a
//! scripted transport. The real implementation ([`FetchTransport`])
//! wraps `gloo-net` and only exists in the browser build.

use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

use crate::session::error::ApiError;

/// HTTP method for an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Request body variants.
///
/// `Raw` payloads (multipart/binary uploads) carry their own content
/// type, which the transport must not override with the JSON default.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Raw {
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

/// A logical API request, addressed relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Bearer token attached by the gateway (or, for the refresh
    /// endpoint, the refresh token attached by the session manager).
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// A received HTTP response: status plus raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the body does not deserialize.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// The server-provided error message, when the body carries one as
    /// an `error` or `message` JSON field.
    pub fn error_message(&self) -> Option<String> {
        let value = serde_json::from_str::<serde_json::Value>(&self.body).ok()?;
        value
            .get("error")
            .or_else(|| value.get("message"))
            .and_then(|v| v.as_str())
            .map(ToOwned::to_owned)
    }
}

/// Executes API requests. `Err` means no HTTP response was received;
/// non-2xx statuses come back as `Ok` for the caller to classify.
pub trait HttpTransport {
    fn execute(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>>;
}

/// Base URL for the remote API. Overridable at build time.
pub fn default_base_url() -> String {
    option_env!("STOREFRONT_API_URL").unwrap_or("/api").to_owned()
}

/// Transport used where no network is available (server rendering).
/// Every call fails as a network error without touching session state.
pub struct InertTransport;

impl HttpTransport for InertTransport {
    fn execute(&self, _request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        Box::pin(async { Err(ApiError::Network("no transport in this environment".to_owned())) })
    }
}

/// `gloo-net` transport for the browser build.
#[cfg(feature = "hydrate")]
pub struct FetchTransport {
    base_url: String,
}

#[cfg(feature = "hydrate")]
impl FetchTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    async fn run(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        use gloo_net::http::RequestBuilder;

        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            Method::Get => gloo_net::http::Method::GET,
            Method::Post => gloo_net::http::Method::POST,
            Method::Put => gloo_net::http::Method::PUT,
            Method::Delete => gloo_net::http::Method::DELETE,
        };

        let mut builder = RequestBuilder::new(&url).method(method);
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if let Some(bearer) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {bearer}"));
        }
        builder = builder.header("Accept", "application/json");

        let ready = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder
                .header("Content-Type", "application/json")
                .body(value.to_string()),
            RequestBody::Raw { content_type, bytes } => {
                if let Some(ct) = &content_type {
                    builder = builder.header("Content-Type", ct);
                }
                builder.body(js_sys::Uint8Array::from(bytes.as_slice()))
            }
        };

        let response = ready
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(ApiResponse { status, body })
    }
}

#[cfg(feature = "hydrate")]
impl HttpTransport for FetchTransport {
    fn execute(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        Box::pin(self.run(request))
    }
}
