//! Binary bodies: a single part sent as-is.

use super::WireBody;
use crate::error::WireError;
use crate::types::{BodySource, Method};

pub(super) async fn build_binary_body(
    method: Method,
    source: &BodySource,
) -> Result<WireBody, WireError> {
    if method == Method::Get {
        return Ok(WireBody::Empty);
    }
    match source.as_bytes() {
        Some(bytes) => Ok(WireBody::Bytes {
            content: bytes.clone(),
            content_type: None,
        }),
        None => Ok(WireBody::Stream(source.open().await?)),
    }
}
