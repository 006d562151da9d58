//! JSON request ingestion
//!
//! The first JSON value in the bounded body is located (empty and malformed
//! bodies fail here), decoded into the destination, and only then is the rest
//! of the body checked for a second value. Decode failures are mapped onto
//! [`Error`] kinds the caller can report back to the client.

use std::collections::BTreeMap;
use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::value::RawValue;

use crate::data::runtime::RUNTIME_ERROR_PREFIX;
use crate::error::{Error, Result};

/// Default upper bound for request bodies (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;

const UNKNOWN_FIELD_PREFIX: &str = "unknown field `";
const TYPE_MISMATCH_PREFIXES: [&str; 3] = ["invalid type:", "invalid value:", "invalid length"];

/// Decodes a single JSON value from a size-bounded body.
#[derive(Debug, Clone, Copy)]
pub struct JsonDecoder {
    max_bytes: usize,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODY_BYTES)
    }
}

impl JsonDecoder {
    /// Create a decoder accepting bodies of at most `max_bytes`.
    ///
    /// Panics if `max_bytes` is zero.
    pub fn new(max_bytes: usize) -> Self {
        assert!(max_bytes > 0, "max_bytes must be greater than zero");
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Read at most `max_bytes + 1` bytes from `reader` and decode them.
    pub fn read<T: DeserializeOwned, R: Read>(&self, reader: R) -> Result<T> {
        let mut body = Vec::new();
        reader
            .take(self.max_bytes as u64 + 1)
            .read_to_end(&mut body)
            .map_err(|err| Error::decode_failed(err.to_string()))?;
        self.decode(&body)
    }

    /// Decode `body` into `T`, classifying any failure.
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        if body.len() > self.max_bytes {
            return Err(Error::PayloadTooLarge {
                limit: self.max_bytes,
            });
        }

        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<&RawValue>();

        let first = match values.next() {
            None => return Err(Error::EmptyBody),
            Some(Err(err)) => return Err(classify(body, 0, &err)),
            Some(Ok(raw)) => raw,
        };

        let base = first.get().as_ptr() as usize - body.as_ptr() as usize;
        let value = serde_json::from_str(first.get())
            .map_err(|err| classify(first.get().as_bytes(), base, &err))?;

        // Anything after the first value, parseable or not, is rejected.
        if values.next().is_some() {
            return Err(Error::TrailingData);
        }

        Ok(value)
    }
}

/// Map a decode error over `input`, which starts `base` bytes into the body.
fn classify(input: &[u8], base: usize, err: &serde_json::Error) -> Error {
    let local = byte_offset(input, err.line(), err.column());

    match err.classify() {
        Category::Eof => Error::MalformedJson { offset: None },
        Category::Syntax => Error::MalformedJson {
            offset: local.map(|offset| base + offset),
        },
        Category::Data => classify_data(input, base, err, local.unwrap_or(0)),
        Category::Io => Error::decode_failed(err.to_string()),
    }
}

fn classify_data(input: &[u8], base: usize, err: &serde_json::Error, local: usize) -> Error {
    let message = message_without_position(err);

    if let Some(rest) = message.strip_prefix(UNKNOWN_FIELD_PREFIX) {
        let name = rest.split('`').next().unwrap_or(rest);
        return Error::UnknownField(name.to_string());
    }

    if TYPE_MISMATCH_PREFIXES
        .iter()
        .any(|prefix| message.starts_with(prefix))
    {
        return Error::TypeMismatch {
            field: member_at(input, local).map(|(name, _)| name),
            offset: base + local,
        };
    }

    if message.starts_with(RUNTIME_ERROR_PREFIX) {
        let raw = member_at(input, local)
            .and_then(|(_, raw)| serde_json::from_str::<String>(raw.get()).ok());
        if let Some(raw) = raw {
            return Error::InvalidRuntimeFormat(raw);
        }
    }

    Error::DecodeFailed(message)
}

/// serde_json appends " at line L column C" to positioned errors.
fn message_without_position(err: &serde_json::Error) -> String {
    let message = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    match message.strip_suffix(&suffix) {
        Some(stripped) => stripped.to_string(),
        None => message,
    }
}

/// Convert serde_json's 1-based line and in-line column into a byte offset.
fn byte_offset(input: &[u8], line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let line_start = if line == 1 {
        0
    } else {
        input
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .nth(line - 2)
            .map(|(idx, _)| idx + 1)?
    };

    Some(line_start + column)
}

/// The top-level object member whose raw value spans `offset`.
fn member_at(input: &[u8], offset: usize) -> Option<(String, &RawValue)> {
    let members: BTreeMap<String, &RawValue> = serde_json::from_slice(input).ok()?;
    let base = input.as_ptr() as usize;

    members.into_iter().find(|(_, raw)| {
        let start = raw.get().as_ptr() as usize - base;
        let end = start + raw.get().len();
        (start..=end).contains(&offset)
    })
}
