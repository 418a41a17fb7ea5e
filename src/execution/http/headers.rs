//! HTTP Headers Utility
//!
//! Splits descriptor headers into message-level and body-level sets.
//!
//! `Content-MD5` and `Content-Range` describe the body and are rejected by the
//! remote API when sent as plain message headers, so they travel with the body
//! instead. Everything else is a message header. Values are accepted as raw
//! bytes (`HeaderValue::from_bytes`) so unusual signed-header values pass
//! through unchanged; only bytes the header map cannot hold at all (control
//! characters) are refused.

use crate::error::WireError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// Header names that belong to the body rather than the message.
pub const BODY_LEVEL_HEADERS: [&str; 2] = ["content-md5", "content-range"];

/// Whether `name` must be attached with the body.
pub fn is_body_header(name: &str) -> bool {
    BODY_LEVEL_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name.trim()))
}

/// Descriptor headers after placement.
#[derive(Debug, Clone, Default)]
pub struct DescriptorHeaders {
    pub message: HeaderMap,
    pub body: HeaderMap,
}

/// Place each descriptor header into the message or body set.
///
/// Order and repeated keys are preserved (`HeaderMap::append`).
pub fn split_descriptor_headers(
    headers: &[(String, String)],
) -> Result<DescriptorHeaders, WireError> {
    let mut placed = DescriptorHeaders::default();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.trim().as_bytes()).map_err(|e| {
            WireError::InvalidHeader(format!("Invalid header name '{key}': {e}"))
        })?;
        let value = lenient_header_value(key, value)?;
        if is_body_header(key) {
            placed.body.append(name, value);
        } else {
            placed.message.append(name, value);
        }
    }
    Ok(placed)
}

fn lenient_header_value(key: &str, value: &str) -> Result<HeaderValue, WireError> {
    HeaderValue::from_bytes(value.as_bytes()).map_err(|e| {
        WireError::InvalidHeader(format!("Invalid header value for '{key}': {e}"))
    })
}

/// Convert reqwest HeaderMap to HashMap<String, String>
///
/// Invalid UTF-8 header values are filtered out; for repeated keys the last
/// value wins.
pub fn headermap_to_hashmap(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(k, v)| {
            v.to_str()
                .ok()
                .map(|v_str| (k.as_str().to_string(), v_str.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn body_headers_are_recognised_case_insensitively() {
        assert!(is_body_header("Content-MD5"));
        assert!(is_body_header("content-range"));
        assert!(is_body_header("CONTENT-RANGE"));
        assert!(!is_body_header("Content-Type"));
        assert!(!is_body_header("Authorization"));
    }

    #[test]
    fn split_places_body_headers_with_the_body() {
        let placed = split_descriptor_headers(&pairs(&[
            ("Authorization", "Bearer t"),
            ("Content-MD5", "Q2hlY2sgSW50ZWdyaXR5IQ=="),
            ("Content-Range", "bytes 0-9/100"),
            ("X-Trace", "1"),
        ]))
        .unwrap();

        assert_eq!(placed.message.len(), 2);
        assert_eq!(placed.body.len(), 2);
        assert_eq!(placed.body.get("content-range").unwrap(), "bytes 0-9/100");
        assert!(placed.message.get("content-md5").is_none());
    }

    #[test]
    fn repeated_keys_are_kept_in_order() {
        let placed =
            split_descriptor_headers(&pairs(&[("X-Tag", "a"), ("X-Tag", "b")])).unwrap();
        let values: Vec<_> = placed
            .message
            .get_all("x-tag")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, ["a", "b"]);
    }

    #[test]
    fn unusual_values_are_not_validated() {
        let signed = "SharedKey acct:abc/def+ghi==; v=\u{e9}t\u{e9}";
        let placed = split_descriptor_headers(&pairs(&[("X-Signature", signed)])).unwrap();
        assert_eq!(
            placed.message.get("x-signature").unwrap().as_bytes(),
            signed.as_bytes()
        );
    }

    #[test]
    fn control_characters_and_bad_names_are_refused() {
        let err = split_descriptor_headers(&pairs(&[("X-Bad", "a\r\nb")])).unwrap_err();
        assert!(matches!(err, WireError::InvalidHeader(_)));
        let err = split_descriptor_headers(&pairs(&[("bad name", "v")])).unwrap_err();
        assert!(matches!(err, WireError::InvalidHeader(_)));
    }

    #[test]
    fn headermap_to_hashmap_keeps_utf8_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ok", HeaderValue::from_static("yes"));
        headers.insert("x-raw", HeaderValue::from_bytes(b"\xff").unwrap());
        let map = headermap_to_hashmap(&headers);
        assert_eq!(map.get("x-ok").map(String::as_str), Some("yes"));
        assert!(!map.contains_key("x-raw"));
    }
}
