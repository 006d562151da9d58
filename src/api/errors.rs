//! Mapping of [`Error`] onto HTTP error responses

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::api::json::{envelope, write_json};
use crate::error::Error;
use crate::validator::FieldErrors;

const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

/// An error response: a status plus the value placed under `"error"`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: serde_json::Value,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<serde_json::Value>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg.into())
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    pub fn method_not_allowed(method: &Method) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("the {method} method is not supported for this resource"),
        )
    }

    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, msg.into())
    }

    pub fn failed_validation(errors: FieldErrors) -> Self {
        let errors: serde_json::Map<String, serde_json::Value> = errors
            .into_iter()
            .map(|(field, message)| (field, message.into()))
            .collect();
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, errors)
    }

    pub fn server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::PayloadTooLarge { .. } => Self::payload_too_large(err.to_string()),
            Error::InvalidIdentifier => Self::not_found(),
            Error::ValidationFailed(errors) => Self::failed_validation(errors),
            err if err.is_client_error() => Self::bad_request(err.to_string()),
            err => {
                tracing::error!(error = %err, "request failed");
                Self::server_error()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match write_json(self.status, &envelope("error", self.message), None) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "failed to write error response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
