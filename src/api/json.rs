//! Reading request bodies and writing JSON responses

use std::collections::BTreeMap;

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::json::JsonDecoder;

/// Wrapper object for JSON messages such as `{"error": ...}`.
pub type Envelope = BTreeMap<String, serde_json::Value>;

pub fn envelope(key: &str, value: impl Into<serde_json::Value>) -> Envelope {
    Envelope::from([(key.to_string(), value.into())])
}

/// Collect at most `decoder.max_bytes()` of `body` and decode it into `T`.
pub async fn read_json<T: DeserializeOwned>(decoder: &JsonDecoder, body: Body) -> Result<T> {
    let limit = decoder.max_bytes();

    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            return Err(Error::PayloadTooLarge { limit });
        }
        Err(err) => return Err(Error::decode_failed(err.to_string())),
    };

    decoder.decode(&bytes)
}

/// Serialize `data` and build a response with `status` and any extra `headers`.
///
/// Nothing is built if serialization fails, so no headers or partial body can
/// reach the client.
pub fn write_json<T: Serialize + ?Sized>(
    status: StatusCode,
    data: &T,
    headers: Option<HeaderMap>,
) -> Result<Response> {
    let body = serde_json::to_vec(data).map_err(Error::SerializationFailed)?;

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;

    if let Some(headers) = headers {
        response.headers_mut().extend(headers);
    }
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Ok(response)
}
