//! Error types for movies-api

use thiserror::Error;

use crate::validator::FieldErrors;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("body must not be larger than {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("{}", malformed_message(.offset))]
    MalformedJson { offset: Option<usize> },

    #[error("body contains unknown key \"{0}\"")]
    UnknownField(String),

    #[error("{}", type_mismatch_message(.field, .offset))]
    TypeMismatch { field: Option<String>, offset: usize },

    #[error("body must not be empty")]
    EmptyBody,

    #[error("body must only contain a single JSON value")]
    TrailingData,

    #[error("{0}")]
    DecodeFailed(String),

    #[error("invalid id parameter")]
    InvalidIdentifier,

    #[error("invalid runtime format: {0:?}")]
    InvalidRuntimeFormat(String),

    #[error("validation failed")]
    ValidationFailed(FieldErrors),

    #[error("an error occurred serializing the response: {0}")]
    SerializationFailed(#[source] serde_json::Error),
}

impl Error {
    pub fn decode_failed(msg: impl Into<String>) -> Self {
        Error::DecodeFailed(msg.into())
    }

    /// Whether the error was caused by the client's request rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::SerializationFailed(_))
    }
}

fn malformed_message(offset: &Option<usize>) -> String {
    match offset {
        Some(offset) => format!("body contains badly-formed JSON (at character {offset})"),
        None => "body contains badly-formed JSON".to_string(),
    }
}

fn type_mismatch_message(field: &Option<String>, offset: &usize) -> String {
    match field {
        Some(field) => format!("body contains incorrect JSON type for field {field:?}"),
        None => format!("body contains incorrect JSON type (at character {offset})"),
    }
}
