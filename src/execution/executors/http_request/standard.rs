//! Standard bodies: raw string payloads and URL-encoded forms.

use super::WireBody;
use crate::defaults::body::{CHARSET, FORM_CONTENT_TYPE, TEXT_CONTENT_TYPE};
use crate::error::WireError;
use crate::types::{Method, RawPayload, StandardPayload};
use bytes::Bytes;
use reqwest::header::HeaderValue;

pub(super) fn build_standard_body(
    method: Method,
    payload: &StandardPayload,
) -> Result<WireBody, WireError> {
    if method == Method::Get {
        return Ok(WireBody::Empty);
    }

    if let Some(raw) = payload.raw.as_ref().filter(|raw| !raw.is_blank()) {
        return Ok(WireBody::Bytes {
            content: Bytes::from(raw.content.clone()),
            content_type: Some(raw_content_type(raw)?),
        });
    }

    Ok(WireBody::Bytes {
        content: Bytes::from(encode_form(&payload.form)),
        content_type: Some(HeaderValue::from_static(FORM_CONTENT_TYPE)),
    })
}

/// `application/x-www-form-urlencoded` serialization, order preserved.
pub fn encode_form(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Content-Type for a raw payload: the supplied media type (or `text/plain`)
/// with a charset parameter unless one is already present.
///
/// Bodies are always encoded as UTF-8; a different requested encoding is
/// logged and replaced.
pub fn raw_content_type(raw: &RawPayload) -> Result<HeaderValue, WireError> {
    let media_type = raw
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or(TEXT_CONTENT_TYPE);

    let value = if media_type.to_ascii_lowercase().contains("charset=") {
        media_type.to_string()
    } else {
        format!("{media_type}; charset={}", charset(raw.content_encoding.as_deref()))
    };

    HeaderValue::from_str(&value)
        .map_err(|e| WireError::InvalidHeader(format!("Invalid content type '{value}': {e}")))
}

fn charset(requested: Option<&str>) -> &'static str {
    match requested.map(|e| e.trim().to_ascii_lowercase()) {
        None => CHARSET,
        Some(e) if e.is_empty() || e == "utf-8" || e == "utf8" => CHARSET,
        Some(other) => {
            tracing::warn!(target: "apiwire::http", requested=%other, "unsupported payload encoding, sending utf-8");
            CHARSET
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(content: &str, ct: Option<&str>, enc: Option<&str>) -> RawPayload {
        RawPayload {
            content: content.to_string(),
            content_type: ct.map(str::to_string),
            content_encoding: enc.map(str::to_string),
        }
    }

    #[test]
    fn form_encoding_escapes_and_keeps_order() {
        let pairs = vec![
            ("name".to_string(), "two words".to_string()),
            ("a&b".to_string(), "c=d".to_string()),
        ];
        assert_eq!(encode_form(&pairs), "name=two%20words&a%26b=c%3Dd");
        assert_eq!(encode_form(&[]), "");
    }

    #[test]
    fn content_type_defaults() {
        let ct = raw_content_type(&raw("x", None, None)).unwrap();
        assert_eq!(ct, "text/plain; charset=utf-8");
        let ct = raw_content_type(&raw("{}", Some("application/json"), Some("UTF8"))).unwrap();
        assert_eq!(ct, "application/json; charset=utf-8");
    }

    #[test]
    fn explicit_charset_is_kept() {
        let ct = raw_content_type(&raw("x", Some("text/xml; charset=UTF-8"), None)).unwrap();
        assert_eq!(ct, "text/xml; charset=UTF-8");
    }

    #[test]
    fn unsupported_encoding_falls_back_to_utf8() {
        let ct = raw_content_type(&raw("x", Some("text/plain"), Some("latin1"))).unwrap();
        assert_eq!(ct, "text/plain; charset=utf-8");
    }
}
