//! Request execution and response classification.
//!
//! [`RequestExecutor`] is the main entry point. It sends a request through its
//! [`Transport`] exactly once and turns the reply into an [`Outcome`].

use crate::decode::{decode_response, Decoder, JsonDecoder};
use crate::error::ErrorEnvelope;
use crate::request::ApiRequest;
use crate::response::DecodedResponse;
use crate::transport::{ReqwestTransport, Transport, TransportReply};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The result of one executed request.
///
/// Exactly one of these is produced per call.
pub type Outcome<T> = std::result::Result<DecodedResponse<T>, ErrorEnvelope>;

/// Sends requests and decodes their responses.
///
/// The executor holds no per-request state. Cloning it is cheap and clones share
/// the same transport, so concurrent calls never interact.
///
/// # Examples
///
/// ```no_run
/// use easyreq::{ErrorEnvelope, RequestDescriptor, RequestExecutor, ReqwestTransport};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let executor = RequestExecutor::new(ReqwestTransport::new()?);
/// let request = RequestDescriptor::get("https://api.example.com/users/123")?;
///
/// match executor.execute::<User>(&request).await {
///     Ok(user) => println!("User {}: {}", user.id, user.name),
///     Err(ErrorEnvelope::Connectivity(message)) => eprintln!("{}", message),
///     Err(e) => eprintln!("Request failed: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RequestExecutor<D = JsonDecoder> {
    transport: Arc<dyn Transport>,
    decoder: D,
}

impl RequestExecutor<JsonDecoder> {
    /// Creates an executor that sends through `transport` and decodes JSON.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Creates an executor from a transport that is already shared.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            decoder: JsonDecoder,
        }
    }
}

impl<D> RequestExecutor<D>
where
    D: Decoder,
{
    /// Replaces the body decoder, keeping the transport.
    pub fn with_decoder<E: Decoder>(self, decoder: E) -> RequestExecutor<E> {
        RequestExecutor {
            transport: self.transport,
            decoder,
        }
    }

    /// Returns the decoder used for response bodies.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Sends `request` once and decodes the response as `T`.
    ///
    /// Never retries and never sets a timeout of its own; both are up to the
    /// transport.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use easyreq::{RequestDescriptor, RequestExecutor};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let executor = RequestExecutor::default();
    /// let request = RequestDescriptor::post("https://api.example.com/search")?
    ///     .with_json_body(&serde_json::json!({ "query": "rust" }))?;
    ///
    /// let response = executor.execute::<serde_json::Value>(&request).await?;
    /// println!("{} -> {}", response.status(), response.entity);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<T>(&self, request: &(impl ApiRequest + ?Sized)) -> Outcome<T>
    where
        T: DeserializeOwned,
    {
        let descriptor = request.descriptor();

        tracing::debug!(
            method = %descriptor.method(),
            url = %descriptor.url(),
            "Executing HTTP request"
        );

        let reply = self.transport.send(&descriptor).await;
        classify(reply, &self.decoder)
    }

    /// Sends `request` on a background task and hands the outcome to
    /// `on_complete`.
    ///
    /// `on_complete` runs exactly once, on the spawned task. Must be called from
    /// within a tokio runtime.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use easyreq::{RequestDescriptor, RequestExecutor};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let executor = RequestExecutor::default();
    /// let request = RequestDescriptor::get("https://api.example.com/health")?;
    ///
    /// let handle = executor.execute_with(&request, |outcome: easyreq::Outcome<serde_json::Value>| {
    ///     match outcome {
    ///         Ok(response) => println!("healthy: {}", response.entity),
    ///         Err(e) => eprintln!("unhealthy: {}", e),
    ///     }
    /// });
    /// handle.await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn execute_with<T, F>(
        &self,
        request: &(impl ApiRequest + ?Sized),
        on_complete: F,
    ) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<T>) + Send + 'static,
        D: Clone + Send + Sync + 'static,
    {
        let executor = self.clone();
        let descriptor = request.descriptor();

        tokio::spawn(async move {
            let outcome = executor.execute::<T>(&descriptor).await;
            on_complete(outcome);
        })
    }
}

impl Default for RequestExecutor<JsonDecoder> {
    /// Creates an executor over a default [`ReqwestTransport`].
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, as `reqwest::Client::new` does.
    /// Use [`RequestExecutor::new`] with [`ReqwestTransport::new`] to handle that
    /// case as an error.
    fn default() -> Self {
        Self::new(ReqwestTransport::from_client(reqwest::Client::new()))
    }
}

impl<D: std::fmt::Debug> std::fmt::Debug for RequestExecutor<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

/// Turns a transport reply into an [`Outcome`].
///
/// Classification is driven by the status code, never by the body:
///
/// 1. No response metadata: [`ErrorEnvelope::Connectivity`].
/// 2. Status in `200..=299` with a non-empty body: decode as `T`, yielding a
///    [`DecodedResponse`] or [`ErrorEnvelope::Decode`].
/// 3. Status in `200..=299` without a body, or any other status:
///    [`ErrorEnvelope::ServerUnavailable`].
///
/// # Examples
///
/// ```
/// use easyreq::{classify, JsonDecoder, TransportError, TransportReply};
/// use http::{HeaderMap, StatusCode};
///
/// let reply = TransportReply::response(StatusCode::OK, HeaderMap::new(), r#"{"id":1}"#);
/// let outcome = classify::<serde_json::Value, _>(reply, &JsonDecoder);
/// assert_eq!(outcome.unwrap().entity["id"], 1);
///
/// let reply = TransportReply::failure(TransportError::Timeout);
/// let outcome = classify::<serde_json::Value, _>(reply, &JsonDecoder);
/// assert!(outcome.unwrap_err().is_connectivity());
/// ```
pub fn classify<T, D>(reply: TransportReply, decoder: &D) -> Outcome<T>
where
    T: DeserializeOwned,
    D: Decoder,
{
    let TransportReply {
        body,
        metadata,
        error,
    } = reply;

    let Some(metadata) = metadata else {
        tracing::warn!(error = ?error, "No HTTP response received");
        return Err(ErrorEnvelope::offline());
    };

    let status = metadata.status;
    tracing::info!(status = status.as_u16(), "Received HTTP response");

    if !status.is_success() {
        if status.is_client_error() {
            tracing::error!(status = status.as_u16(), "Client error (4xx)");
        } else {
            tracing::warn!(status = status.as_u16(), "Non-success status");
        }
        return Err(ErrorEnvelope::server_unavailable());
    }

    match body {
        Some(raw_body) if !raw_body.is_empty() => {
            decode_response(decoder, raw_body, metadata).map_err(|e| {
                tracing::error!(
                    error = %e.source,
                    raw_response = %e.raw_body_lossy(),
                    "Failed to decode response"
                );
                ErrorEnvelope::Decode(e)
            })
        }
        _ => {
            tracing::warn!(
                status = status.as_u16(),
                error = ?error,
                "Successful status without a body"
            );
            Err(ErrorEnvelope::server_unavailable())
        }
    }
}
