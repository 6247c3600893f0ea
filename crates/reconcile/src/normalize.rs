//! Canonical JSON normalization
//!
//! `serde_json`'s default object map is a `BTreeMap`, so decoding and
//! re-encoding a value yields sorted keys and no extraneous whitespace.
//! Two texts describing the same logical value normalize to the same
//! string.

use serde_json::Value;
use thiserror::Error;

/// Errors produced by the pure reconciliation primitives.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for normalization.
pub type Result<T> = std::result::Result<T, Error>;

/// Decode JSON text into a value.
///
/// Fails with [`Error::Decode`] on malformed input. Callers on the
/// payload-translation path must treat that as fatal; callers on the
/// comparison path fall back to leaving the raw-text difference intact.
pub fn decode(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Re-encode JSON text in canonical form.
///
/// Pure: the input is never mutated, the output is a fresh string.
pub fn normalize(text: &str) -> Result<String> {
    let value = decode(text)?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sorts_keys() {
        let a = normalize(r#"{"b":2,"a":1}"#).unwrap();
        let b = normalize(r#"{"a":1,"b":2}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_strips_whitespace() {
        let got = normalize("{ \"a\" : 1 ,\n \"b\" : [ 1 , 2 ] }").unwrap();
        assert_eq!(got, r#"{"a":1,"b":[1,2]}"#);
    }

    #[test]
    fn test_normalize_nested() {
        let a = normalize(r#"{"outer":{"z":true,"a":null}}"#).unwrap();
        let b = normalize(r#"{ "outer": { "a": null, "z": true } }"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_scalars_and_arrays() {
        assert_eq!(normalize("42").unwrap(), "42");
        assert_eq!(normalize("[1, 2, 3]").unwrap(), "[1,2,3]");
        assert_eq!(normalize("\"text\"").unwrap(), "\"text\"");
    }

    #[test]
    fn test_normalize_invalid_json() {
        assert!(matches!(normalize("{not json"), Err(Error::Decode(_))));
        assert!(matches!(normalize(""), Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_roundtrip() {
        let value = decode(r#"{"a": [1, {"b": null}]}"#).unwrap();
        assert!(value.is_object());
    }
}
