//! The HTTP transport seam.
//!
//! A [`Transport`] sends one [`RequestDescriptor`] and reports whatever came back as
//! a [`TransportReply`]. The executor never talks to the network directly, so a
//! mock transport is enough to drive it in tests. [`ReqwestTransport`] is the
//! default implementation.

use crate::request::RequestDescriptor;
use crate::response::ResponseMetadata;
use crate::{Error, Result};
use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use std::time::Duration;

/// Something that can send an HTTP request.
///
/// Implementations must report every attempt through the returned reply, never by
/// panicking.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use easyreq::{RequestDescriptor, Transport, TransportReply};
/// use http::{HeaderMap, StatusCode};
///
/// /// Answers every request with the same canned body.
/// struct Canned(&'static str);
///
/// #[async_trait]
/// impl Transport for Canned {
///     async fn send(&self, _request: &RequestDescriptor) -> TransportReply {
///         TransportReply::response(StatusCode::OK, HeaderMap::new(), self.0.as_bytes().to_vec())
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` once and reports the result.
    async fn send(&self, request: &RequestDescriptor) -> TransportReply;
}

/// A transport-level failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Headers arrived but reading the body failed.
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Everything a transport observed for one request.
///
/// Each part is optional. A reply without `metadata` means no HTTP response was
/// received; `body` may be missing even when `metadata` is present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransportReply {
    /// The response body.
    pub body: Option<Vec<u8>>,

    /// Status code and headers, if an HTTP response was received.
    pub metadata: Option<ResponseMetadata>,

    /// The transport error, if any.
    pub error: Option<TransportError>,
}

impl TransportReply {
    /// Creates a reply from its raw parts.
    pub fn new(
        body: Option<Vec<u8>>,
        metadata: Option<ResponseMetadata>,
        error: Option<TransportError>,
    ) -> Self {
        Self {
            body,
            metadata,
            error,
        }
    }

    /// A received HTTP response with a body.
    pub fn response(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self::new(
            Some(body.into()),
            Some(ResponseMetadata::new(status, headers)),
            None,
        )
    }

    /// A received HTTP response without a body.
    pub fn empty_response(status: StatusCode, headers: HeaderMap) -> Self {
        Self::new(None, Some(ResponseMetadata::new(status, headers)), None)
    }

    /// No HTTP response was received.
    pub fn failure(error: TransportError) -> Self {
        Self::new(None, None, Some(error))
    }
}

/// A [`Transport`] backed by a `reqwest::Client`.
///
/// The client keeps its own connection pool, so one transport should be shared
/// across executors rather than built per request.
///
/// # Examples
///
/// ```no_run
/// use easyreq::{ReqwestTransport, RequestExecutor};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), easyreq::Error> {
/// let transport = ReqwestTransport::builder()
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
///
/// let executor = RequestExecutor::new(transport);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    default_headers: HeaderMap,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest's defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built, for example
    /// when no TLS backend is available.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a new `ReqwestTransportBuilder`.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new()
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            default_headers: HeaderMap::new(),
        }
    }

    fn build_request(&self, request: &RequestDescriptor) -> reqwest::RequestBuilder {
        let mut builder = self
            .http_client
            .request(request.method().clone(), request.url().clone());

        // Request-specific headers replace defaults with the same name.
        let mut headers = self.default_headers.clone();
        for name in request.headers().keys() {
            headers.remove(name);
        }
        for (name, value) in request.headers() {
            headers.append(name, value.clone());
        }
        builder = builder.headers(headers);

        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        builder
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> TransportReply {
        let response = match self.build_request(request).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(e.to_string())
                };
                tracing::debug!(
                    error = %error,
                    url = %request.url(),
                    "Transport produced no response"
                );
                return TransportReply::failure(error);
            }
        };

        let status = response.status();
        let headers = response.headers().clone();

        match response.bytes().await {
            Ok(bytes) if bytes.is_empty() => TransportReply::empty_response(status, headers),
            Ok(bytes) => TransportReply::response(status, headers, bytes.to_vec()),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    status = status.as_u16(),
                    "Failed to read response body"
                );
                TransportReply::new(
                    None,
                    Some(ResponseMetadata::new(status, headers)),
                    Some(TransportError::Body(e.to_string())),
                )
            }
        }
    }
}

/// Builder for configuring and creating a [`ReqwestTransport`].
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ReqwestTransportBuilder {
    /// Creates a new `ReqwestTransportBuilder` with reqwest's defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the total timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout for establishing a connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Builds the configured `ReqwestTransport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn build(self) -> Result<ReqwestTransport> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let http_client = builder.build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(ReqwestTransport {
            http_client,
            default_headers: self.default_headers,
        })
    }
}
