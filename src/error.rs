//! Error types.
//!
//! Two families live here. [`ErrorEnvelope`] is what a request can fail with once it
//! has been handed to the executor: every failure path of a call is one of its three
//! variants. [`Error`] covers mistakes made while building a request or a transport,
//! before anything touches the network.

use crate::response::ResponseMetadata;
use http::StatusCode;

/// Message reported when the transport produced no HTTP response at all.
pub const OFFLINE_MESSAGE: &str = "The Internet connection appears to be offline.";

/// Message reported for non-2xx responses and for 2xx responses without a body.
pub const SERVER_UNAVAILABLE_MESSAGE: &str = "The server appears to be offline at the moment.";

/// The failure half of an [`Outcome`](crate::Outcome).
///
/// # Examples
///
/// ```no_run
/// use easyreq::{ErrorEnvelope, RequestDescriptor, RequestExecutor};
///
/// # async fn example() -> Result<(), easyreq::Error> {
/// let executor = RequestExecutor::default();
/// let request = RequestDescriptor::get("https://api.example.com/status")?;
///
/// match executor.execute::<serde_json::Value>(&request).await {
///     Ok(response) => println!("Success: {:?}", response.entity),
///     Err(ErrorEnvelope::Decode(err)) => {
///         eprintln!("Bad body (status {}): {}", err.metadata.status, err.source);
///         eprintln!("Raw body: {}", String::from_utf8_lossy(&err.raw_body));
///     }
///     Err(e) => eprintln!("{}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum ErrorEnvelope {
    /// The transport returned no usable HTTP response (DNS failure, refused
    /// connection, timeout, no network).
    #[error("{0}")]
    Connectivity(String),

    /// The server answered with a status outside `200..=299`, or with a 2xx
    /// status but no body.
    ///
    /// The actual status code and any error body are not kept.
    #[error("{0}")]
    ServerUnavailable(String),

    /// The server answered with a 2xx status and a body that could not be decoded
    /// into the requested type.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ErrorEnvelope {
    pub(crate) fn offline() -> Self {
        ErrorEnvelope::Connectivity(OFFLINE_MESSAGE.to_string())
    }

    pub(crate) fn server_unavailable() -> Self {
        ErrorEnvelope::ServerUnavailable(SERVER_UNAVAILABLE_MESSAGE.to_string())
    }

    /// Returns the human-readable description of this failure.
    ///
    /// For decode failures this is the underlying deserializer's message.
    pub fn message(&self) -> String {
        match self {
            ErrorEnvelope::Connectivity(message) => message.clone(),
            ErrorEnvelope::ServerUnavailable(message) => message.clone(),
            ErrorEnvelope::Decode(err) => err.source.to_string(),
        }
    }

    /// Returns `true` for [`ErrorEnvelope::Connectivity`].
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ErrorEnvelope::Connectivity(_))
    }

    /// Returns `true` for [`ErrorEnvelope::ServerUnavailable`].
    pub fn is_server_unavailable(&self) -> bool {
        matches!(self, ErrorEnvelope::ServerUnavailable(_))
    }

    /// Returns `true` for [`ErrorEnvelope::Decode`].
    pub fn is_decode(&self) -> bool {
        matches!(self, ErrorEnvelope::Decode(_))
    }

    /// Returns the HTTP status code if this failure kept one.
    ///
    /// Only decode failures carry response metadata.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ErrorEnvelope::Decode(err) => Some(err.metadata.status),
            _ => None,
        }
    }

    /// Returns the raw response body if this failure kept one.
    pub fn raw_body(&self) -> Option<&[u8]> {
        match self {
            ErrorEnvelope::Decode(err) => Some(&err.raw_body),
            _ => None,
        }
    }
}

/// A 2xx response whose body could not be decoded.
///
/// Keeps everything needed to inspect or replay the decode: the deserializer's
/// error, the response metadata and the body bytes exactly as received.
#[derive(thiserror::Error, Debug)]
#[error("Failed to decode response (status {}): {source}", .metadata.status)]
pub struct DecodeError {
    /// The error reported by the deserializer.
    pub source: Box<dyn std::error::Error + Send + Sync>,
    /// Status and headers of the response.
    pub metadata: ResponseMetadata,
    /// The response body as received.
    pub raw_body: Vec<u8>,
}

impl DecodeError {
    /// Numeric code identifying a response parse failure.
    pub const CODE: u16 = 999;

    /// Returns the raw body as text, replacing invalid UTF-8.
    pub fn raw_body_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.raw_body)
    }
}

/// Errors raised while building requests or transports.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid configuration was provided, such as a bad header name or value.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A specialized `Result` type for request and transport construction.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    fn decode_error() -> DecodeError {
        let source = serde_json::from_slice::<u32>(b"nope").unwrap_err();
        DecodeError {
            source: Box::new(source),
            metadata: ResponseMetadata::new(StatusCode::OK, HeaderMap::new()),
            raw_body: b"nope".to_vec(),
        }
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            ErrorEnvelope::offline().to_string(),
            "The Internet connection appears to be offline."
        );
        assert_eq!(
            ErrorEnvelope::server_unavailable().message(),
            "The server appears to be offline at the moment."
        );
    }

    #[test]
    fn test_decode_error_accessors() {
        let err = ErrorEnvelope::from(decode_error());

        assert!(err.is_decode());
        assert!(!err.is_connectivity());
        assert_eq!(err.status(), Some(StatusCode::OK));
        assert_eq!(err.raw_body(), Some(&b"nope"[..]));
        assert!(err.to_string().starts_with("Failed to decode response (status 200 OK)"));
    }

    #[test]
    fn test_transport_failures_carry_no_response_data() {
        let err = ErrorEnvelope::server_unavailable();
        assert!(err.is_server_unavailable());
        assert_eq!(err.status(), None);
        assert_eq!(err.raw_body(), None);
    }

    #[test]
    fn test_raw_body_lossy() {
        let mut err = decode_error();
        err.raw_body = vec![b'o', b'k', 0xff];
        assert_eq!(err.raw_body_lossy(), "ok\u{fffd}");
    }
}
