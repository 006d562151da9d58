//! movies-api - A JSON HTTP API for a catalog of movie records
//!
//! The interesting parts are the request-ingestion pipeline:
//! - [`json`]: bounded JSON decoding with client-facing error triage
//! - [`api::json::write_json`]: uniform JSON response writing
//! - [`validator`]: field-level validation that collects every failure
//! - [`data::Runtime`]: the `"<N> mins"` runtime scalar

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod json;
pub mod validator;

pub use error::{Error, Result};
