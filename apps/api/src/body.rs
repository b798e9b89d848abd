//! Request bodies read as loose JSON.
//!
//! Clients send an object and the handlers pick fields out of it, but any
//! JSON value other than `null` is accepted; a missing field reads as absent.

use anyhow::{bail, Context, Result};
use serde_json::Value;

/// Parses `body` as JSON. Fails on unparseable input and on `null`.
pub fn parse_loose_json(body: &[u8]) -> Result<Value> {
    let value: Value = serde_json::from_slice(body).context("request body is not valid JSON")?;
    if value.is_null() {
        bail!("request body is JSON null");
    }
    Ok(value)
}

/// Reads `key` from an object body; `None` for other JSON types or a missing key.
pub fn field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitives_are_accepted() {
        for raw in ["\"hello\"", "42", "true", "[]", "{}"] {
            assert!(parse_loose_json(raw.as_bytes()).is_ok(), "{raw}");
        }
    }

    #[test]
    fn test_null_and_garbage_are_rejected() {
        assert!(parse_loose_json(b"null").is_err());
        assert!(parse_loose_json(b"not json").is_err());
        assert!(parse_loose_json(b"").is_err());
    }

    #[test]
    fn test_field_reads_objects_only() {
        let object = json!({ "audioData": "abc" });
        assert_eq!(field(&object, "audioData"), Some(&json!("abc")));
        assert_eq!(field(&object, "userId"), None);
        assert_eq!(field(&json!("hello"), "audioData"), None);
    }
}
