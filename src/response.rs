//! Response types.
//!
//! [`ResponseMetadata`] is what the transport reports about an HTTP response.
//! [`DecodedResponse`] pairs it with the entity decoded from the body.

use http::{HeaderMap, StatusCode};

/// Status code and headers of an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMetadata {
    /// The HTTP status code.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,
}

impl ResponseMetadata {
    /// Creates a new `ResponseMetadata`.
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    /// Returns `true` if the status is in `200..=299`.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

/// A successfully decoded response.
///
/// # Type Parameters
///
/// * `T` - The type the body was decoded into
///
/// # Examples
///
/// ```no_run
/// use easyreq::{RequestDescriptor, RequestExecutor};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let executor = RequestExecutor::default();
/// let request = RequestDescriptor::get("https://api.example.com/users/123")?;
///
/// let response = executor.execute::<User>(&request).await?;
///
/// println!("User: {}", response.entity.name);
/// println!("Status: {}", response.status());
/// println!("Content-Type: {:?}", response.header("content-type"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedResponse<T> {
    /// The decoded body.
    pub entity: T,

    /// Status and headers of the response.
    pub metadata: ResponseMetadata,
}

impl<T> DecodedResponse<T> {
    /// Creates a new `DecodedResponse`.
    pub fn new(entity: T, metadata: ResponseMetadata) -> Self {
        Self { entity, metadata }
    }

    /// The HTTP status code of the response.
    pub fn status(&self) -> StatusCode {
        self.metadata.status
    }

    /// Returns a header value by name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use easyreq::{DecodedResponse, ResponseMetadata};
    /// # use http::{HeaderMap, HeaderValue, StatusCode};
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("application/json"));
    ///
    /// let response = DecodedResponse::new((), ResponseMetadata::new(StatusCode::OK, headers));
    ///
    /// assert_eq!(response.header("content-type"), Some("application/json"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.metadata.header(name)
    }

    /// Maps the entity to a different type, keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use easyreq::{DecodedResponse, ResponseMetadata};
    /// # use http::{HeaderMap, StatusCode};
    /// let response = DecodedResponse::new(42, ResponseMetadata::new(StatusCode::OK, HeaderMap::new()));
    ///
    /// let string_response = response.map(|n| n.to_string());
    /// assert_eq!(string_response.entity, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> DecodedResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        DecodedResponse {
            entity: f(self.entity),
            metadata: self.metadata,
        }
    }

    /// Discards the metadata and returns the entity.
    pub fn into_entity(self) -> T {
        self.entity
    }
}

impl<T> AsRef<T> for DecodedResponse<T> {
    fn as_ref(&self) -> &T {
        &self.entity
    }
}

impl<T> std::ops::Deref for DecodedResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.entity
    }
}
