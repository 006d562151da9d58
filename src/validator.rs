//! Field-level validation accumulator
//!
//! A [`Validator`] collects one message per failing field instead of stopping at
//! the first failure. Each validation run owns a fresh validator.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Failing field name mapped to its message.
pub type FieldErrors = BTreeMap<String, String>;

/// Valid e-mail address as defined by https://html.spec.whatwg.org/#valid-e-mail-address
pub static EMAIL_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("EMAIL_RX is a valid pattern")
});

#[derive(Debug, Clone, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no errors have been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` for `key` unless the key already has one.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `key` only when `ok` is false.
    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Finish the run, yielding [`Error::ValidationFailed`] with every recorded failure.
    pub fn into_result(self) -> Result<()> {
        if self.valid() {
            Ok(())
        } else {
            Err(Error::ValidationFailed(self.errors))
        }
    }
}

/// True if `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

/// True if every value in the slice is distinct.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let distinct: HashSet<&T> = values.iter().collect();
    distinct.len() == values.len()
}

pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}
