//! Movie runtime in minutes
//!
//! On the wire a runtime is always a JSON string of the form `"<N> mins"`.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

const UNIT_SUFFIX: &str = " mins";

/// Leading text of [`Error::InvalidRuntimeFormat`]'s message.
pub(crate) const RUNTIME_ERROR_PREFIX: &str = "invalid runtime format: ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Runtime(pub u32);

impl Runtime {
    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Runtime {
    fn from(minutes: u32) -> Self {
        Runtime(minutes)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, UNIT_SUFFIX)
    }
}

impl FromStr for Runtime {
    type Err = Error;

    /// Accepts exactly `<digits> mins`. Leading zeros are rejected so that the
    /// parsed value formats back to the same string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidRuntimeFormat(s.to_string());

        let digits = s.strip_suffix(UNIT_SUFFIX).ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(invalid());
        }

        digits.parse::<u32>().map(Runtime).map_err(|_| invalid())
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RuntimeVisitor)
    }
}

struct RuntimeVisitor;

impl Visitor<'_> for RuntimeVisitor {
    type Value = Runtime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string of the form \"<N> mins\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Runtime, E> {
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_runtime() {
        assert_eq!("107 mins".parse::<Runtime>().unwrap(), Runtime(107));
        assert_eq!("0 mins".parse::<Runtime>().unwrap(), Runtime(0));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for raw in [
            "-1 mins",
            "107",
            "107 minutes",
            " 107 mins",
            "107 mins ",
            "107  mins",
            "107mins",
            "1.5 mins",
            "+5 mins",
            "007 mins",
            " mins",
            "99999999999 mins",
        ] {
            match raw.parse::<Runtime>() {
                Err(Error::InvalidRuntimeFormat(got)) => assert_eq!(got, raw),
                other => panic!("expected {raw:?} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_error_message_prefix() {
        let err = "107".parse::<Runtime>().unwrap_err();
        assert!(err.to_string().starts_with(RUNTIME_ERROR_PREFIX));
    }

    #[test]
    fn test_format() {
        assert_eq!(Runtime(107).to_string(), "107 mins");
        assert_eq!(Runtime(0).to_string(), "0 mins");
    }

    #[test]
    fn test_round_trip_sampled_values() {
        let mut samples = vec![0, 1, 9, 10, 99, 100, 107, u32::MAX - 1, u32::MAX];
        samples.extend((0..1_000).map(|_| fastrand::u32(..)));

        for minutes in samples {
            let encoded = Runtime(minutes).to_string();
            let decoded: Runtime = encoded.parse().unwrap();
            assert_eq!(decoded.minutes(), minutes);
            assert_eq!(decoded.to_string(), encoded);
        }
    }

    #[test]
    fn test_json_representation() {
        assert_eq!(serde_json::to_string(&Runtime(102)).unwrap(), "\"102 mins\"");

        let runtime: Runtime = serde_json::from_str("\"107 mins\"").unwrap();
        assert_eq!(runtime, Runtime(107));

        assert!(serde_json::from_str::<Runtime>("\"107 minutes\"").is_err());
        assert!(serde_json::from_str::<Runtime>("107").is_err());
    }
}
