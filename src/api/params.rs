//! Path parameter parsing

use crate::error::{Error, Result};

/// Parse a path-embedded movie id. Ids are base-10 integers of at least 1.
pub fn parse_id(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(Error::InvalidIdentifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(&i64::MAX.to_string()).unwrap(), i64::MAX);
    }

    #[test]
    fn test_reject_invalid_ids() {
        for raw in ["0", "-5", "blah", "", "1.5", " 1", "99999999999999999999"] {
            assert!(
                matches!(parse_id(raw), Err(Error::InvalidIdentifier)),
                "{raw:?} should be rejected"
            );
        }
    }
}
