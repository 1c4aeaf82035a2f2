//! Outbound request descriptions.

use http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use url::Url;

/// Everything needed to send one HTTP request.
///
/// A descriptor is assembled with the consuming `with_*` methods and is read-only
/// once built; the executor only ever borrows it.
///
/// # Examples
///
/// ```
/// use easyreq::RequestDescriptor;
/// use http::Method;
///
/// # fn example() -> Result<(), easyreq::Error> {
/// let request = RequestDescriptor::new(Method::POST, "https://api.example.com/users")?
///     .with_header("Authorization", "Bearer token")?
///     .with_json_body(&serde_json::json!({ "name": "Alice" }))?;
///
/// assert_eq!(request.method(), &Method::POST);
/// assert_eq!(request.header("content-type"), Some("application/json"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    /// Creates a descriptor with the given method and absolute URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(method: Method, url: impl AsRef<str>) -> crate::Result<Self> {
        Ok(Self::from_url(method, Url::parse(url.as_ref())?))
    }

    /// Creates a descriptor from an already parsed URL.
    pub fn from_url(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Shorthand for a `GET` descriptor.
    pub fn get(url: impl AsRef<str>) -> crate::Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Shorthand for a `POST` descriptor.
    pub fn post(url: impl AsRef<str>) -> crate::Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Adds a header to the request, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> crate::Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Appends a query parameter to the URL.
    pub fn with_query_param(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.url
            .query_pairs_mut()
            .append_pair(key.as_ref(), value.as_ref());
        self
    }

    /// Sets the raw request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `body` as JSON and sets it as the request body, along with a
    /// `content-type: application/json` header.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn with_json_body<B: Serialize + ?Sized>(mut self, body: &B) -> crate::Result<Self> {
        let bytes =
            serde_json::to_vec(body).map_err(|e| crate::Error::SerializationFailed(e.to_string()))?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(bytes);
        Ok(self)
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// The request body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// A value that knows how to describe itself as an HTTP request.
///
/// Implement this for typed API calls so they can be handed straight to
/// [`RequestExecutor`](crate::RequestExecutor).
///
/// # Examples
///
/// ```
/// use easyreq::{ApiRequest, RequestDescriptor};
///
/// struct GetUser {
///     id: u64,
/// }
///
/// impl ApiRequest for GetUser {
///     fn descriptor(&self) -> RequestDescriptor {
///         let url = format!("https://api.example.com/users/{}", self.id);
///         RequestDescriptor::from_url(http::Method::GET, url.parse().expect("valid url"))
///     }
/// }
///
/// assert_eq!(GetUser { id: 7 }.descriptor().url().path(), "/users/7");
/// ```
pub trait ApiRequest {
    /// Returns the fully formed request.
    fn descriptor(&self) -> RequestDescriptor;
}

impl ApiRequest for RequestDescriptor {
    fn descriptor(&self) -> RequestDescriptor {
        self.clone()
    }
}
