//! Body decoding.
//!
//! A [`Decoder`] turns raw body bytes into any `DeserializeOwned` type. The
//! executor is generic over it so other wire formats can be plugged in; the
//! default is [`JsonDecoder`].

use crate::error::DecodeError;
use crate::response::{DecodedResponse, ResponseMetadata};
use serde::de::DeserializeOwned;

/// A deserialization format.
///
/// # Examples
///
/// ```
/// use easyreq::Decoder;
/// use serde::de::DeserializeOwned;
///
/// /// Decodes bodies wrapped in a `{"data": ...}` envelope.
/// #[derive(Clone)]
/// struct Enveloped;
///
/// impl Decoder for Enveloped {
///     type Error = serde_json::Error;
///
///     fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error> {
///         #[derive(serde::Deserialize)]
///         struct Envelope<T> {
///             data: T,
///         }
///         serde_json::from_slice::<Envelope<T>>(bytes).map(|e| e.data)
///     }
/// }
///
/// let n: u32 = Enveloped.decode(br#"{"data": 5}"#).unwrap();
/// assert_eq!(n, 5);
/// ```
pub trait Decoder {
    /// The error reported when bytes cannot be decoded.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decodes `bytes` into a `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error>;
}

/// Decodes JSON bodies with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Decodes `raw_body` into a `T` and pairs it with `metadata`.
///
/// On failure the returned [`DecodeError`] keeps the decoder's error, the
/// metadata and `raw_body` unchanged.
///
/// # Examples
///
/// ```
/// use easyreq::{decode_response, JsonDecoder, ResponseMetadata};
/// use http::{HeaderMap, StatusCode};
///
/// let metadata = ResponseMetadata::new(StatusCode::OK, HeaderMap::new());
///
/// let ok = decode_response::<Vec<u8>, _>(&JsonDecoder, b"[1,2,3]".to_vec(), metadata.clone());
/// assert_eq!(ok.unwrap().entity, vec![1, 2, 3]);
///
/// let err = decode_response::<Vec<u8>, _>(&JsonDecoder, b"[1,2".to_vec(), metadata);
/// assert_eq!(err.unwrap_err().raw_body, b"[1,2");
/// ```
pub fn decode_response<T, D>(
    decoder: &D,
    raw_body: Vec<u8>,
    metadata: ResponseMetadata,
) -> Result<DecodedResponse<T>, DecodeError>
where
    T: DeserializeOwned,
    D: Decoder,
{
    match decoder.decode::<T>(&raw_body) {
        Ok(entity) => Ok(DecodedResponse::new(entity, metadata)),
        Err(e) => Err(DecodeError {
            source: Box::new(e),
            metadata,
            raw_body,
        }),
    }
}
