//! Response materialization
//!
//! An attempt's response is first *received* according to the read mode, then
//! the terminal one is *materialized* into a [`ResponsePackage`]. Status
//! classification happens exactly once, here.

use crate::error::WireError;
use crate::types::{
    ByteStream, ExpectedShape, ReadMode, ResponseBody, ResponsePackage, SemanticStatus,
};
use futures::TryStreamExt;
use reqwest::header::HeaderMap;

/// A response as far as the transport has read it.
#[derive(Debug)]
pub enum Received {
    /// Body fully read and decoded as text.
    Buffered {
        status_code: u16,
        headers: HeaderMap,
        text: String,
    },
    /// Headers read, body still on the wire.
    Open(reqwest::Response),
}

impl Received {
    pub async fn read(response: reqwest::Response, mode: ReadMode) -> Result<Self, WireError> {
        match mode {
            ReadMode::HeadersOnly => Ok(Self::Open(response)),
            ReadMode::FullBody => {
                let status_code = response.status().as_u16();
                let headers = response.headers().clone();
                let text = response.text().await?;
                Ok(Self::Buffered {
                    status_code,
                    headers,
                    text,
                })
            }
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Buffered { status_code, .. } => *status_code,
            Self::Open(response) => response.status().as_u16(),
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        match self {
            Self::Buffered { headers, .. } => headers,
            Self::Open(response) => response.headers(),
        }
    }
}

/// Build the response package for the terminal attempt.
///
/// A `ByteStream` shape yields an open stream only for `Success`; every other
/// outcome is buffered as text.
pub async fn materialize(
    received: Received,
    shape: ExpectedShape,
) -> Result<ResponsePackage, WireError> {
    let status_code = received.status_code();
    let status = SemanticStatus::from_code(status_code);
    let (headers, body) = match received {
        Received::Buffered { headers, text, .. } => (headers, ResponseBody::Text(text)),
        Received::Open(response) => {
            let headers = response.headers().clone();
            let body = if shape == ExpectedShape::ByteStream && status.is_success() {
                let stream: ByteStream = Box::pin(response.bytes_stream().map_err(WireError::from));
                ResponseBody::Stream(stream)
            } else {
                ResponseBody::Text(response.text().await?)
            };
            (headers, body)
        }
    };
    Ok(ResponsePackage {
        status_code,
        status,
        headers,
        body,
        result: None,
    })
}
