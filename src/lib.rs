//! # easyreq - single-shot typed HTTP requests
//!
//! easyreq sends one HTTP request, checks the status code and decodes the body into
//! a type of your choosing. Every call ends in exactly one [`Outcome`]: either a
//! [`DecodedResponse`] holding the entity and the response metadata, or an
//! [`ErrorEnvelope`] saying why it failed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use easyreq::{RequestDescriptor, RequestExecutor, ReqwestTransport};
//! use serde::Deserialize;
//! use std::time::Duration;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = ReqwestTransport::builder()
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!     let executor = RequestExecutor::new(transport);
//!
//!     let request = RequestDescriptor::get("https://api.example.com/users/123")?;
//!     let user = executor.execute::<User>(&request).await?;
//!
//!     println!("User {}: {}", user.entity.id, user.entity.name);
//!     println!("Status: {}", user.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Failure classification
//!
//! Failures fall into three kinds, decided by what the transport observed:
//!
//! - [`ErrorEnvelope::Connectivity`]: no HTTP response arrived at all.
//! - [`ErrorEnvelope::ServerUnavailable`]: the status was outside `200..=299`, or a
//!   2xx response had no body. The status code and body are not kept.
//! - [`ErrorEnvelope::Decode`]: a 2xx body could not be decoded. The deserializer's
//!   error, the metadata and the raw bytes are kept for inspection.
//!
//! ```no_run
//! use easyreq::{ErrorEnvelope, RequestDescriptor, RequestExecutor};
//!
//! # async fn example() -> Result<(), easyreq::Error> {
//! let executor = RequestExecutor::default();
//! let request = RequestDescriptor::get("https://api.example.com/endpoint")?;
//!
//! match executor.execute::<serde_json::Value>(&request).await {
//!     Ok(response) => println!("Success: {:?}", response.entity),
//!     Err(ErrorEnvelope::Decode(err)) => {
//!         eprintln!("Failed to decode (status {}):", err.metadata.status);
//!         eprintln!("  Raw response: {}", err.raw_body_lossy());
//!         eprintln!("  Error: {}", err.source);
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## What it does not do
//!
//! Requests are never retried and the executor sets no timeout of its own. Both
//! are left to the caller and to the [`Transport`]. Swap in your own transport to
//! change how requests reach the network, and your own [`Decoder`] to read formats
//! other than JSON.

mod decode;
mod error;
mod executor;
mod request;
mod response;
mod transport;

pub use decode::{decode_response, Decoder, JsonDecoder};
pub use error::{
    DecodeError, Error, ErrorEnvelope, Result, OFFLINE_MESSAGE, SERVER_UNAVAILABLE_MESSAGE,
};
pub use executor::{classify, Outcome, RequestExecutor};
pub use request::{ApiRequest, RequestDescriptor};
pub use response::{DecodedResponse, ResponseMetadata};
pub use transport::{
    ReqwestTransport, ReqwestTransportBuilder, Transport, TransportError, TransportReply,
};
