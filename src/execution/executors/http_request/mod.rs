//! Wire request construction
//!
//! Turns a [`RequestDescriptor`] into a [`WireRequest`]: the concrete method,
//! URL, message headers, body headers and encoded body for one attempt. The
//! strategy is chosen by an exhaustive match on the descriptor payload.
//!
//! A `WireRequest` owns single-use body streams, so the executor builds a new
//! one for every attempt.

mod binary;
mod multipart;
mod standard;

pub use multipart::{MultipartBody, MultipartSegment};
pub use standard::{encode_form, raw_content_type};

use crate::error::WireError;
use crate::execution::http::client::TransportClient;
use crate::execution::http::headers::{DescriptorHeaders, split_descriptor_headers};
use crate::types::{Method, Payload, ReadMode, RequestDescriptor};
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

/// Encoded request body.
#[derive(Debug)]
pub enum WireBody {
    Empty,
    /// Fully encoded in memory.
    Bytes {
        content: Bytes,
        content_type: Option<HeaderValue>,
    },
    /// Streamed from a body source.
    Stream(reqwest::Body),
    Multipart(MultipartBody),
}

impl WireBody {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Bytes { .. } => "bytes",
            Self::Stream(_) => "stream",
            Self::Multipart(_) => "multipart",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// In-memory content, if the body has it.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes { content, .. } => Some(&content[..]),
            Self::Stream(body) => body.as_bytes(),
            Self::Empty | Self::Multipart(_) => None,
        }
    }

    pub fn content_type(&self) -> Option<&HeaderValue> {
        match self {
            Self::Bytes { content_type, .. } => content_type.as_ref(),
            _ => None,
        }
    }
}

/// A concrete request for one attempt.
#[derive(Debug)]
pub struct WireRequest {
    pub method: Method,
    pub url: reqwest::Url,
    /// Message-level headers.
    pub headers: HeaderMap,
    /// Headers that must accompany the body.
    pub body_headers: HeaderMap,
    pub body: WireBody,
}

/// Build the wire request for one attempt of `descriptor`.
pub async fn build_wire_request(descriptor: &RequestDescriptor) -> Result<WireRequest, WireError> {
    let DescriptorHeaders {
        message: mut headers,
        body: body_headers,
    } = split_descriptor_headers(descriptor.headers())?;

    let (method, body) = match descriptor.payload() {
        Payload::Standard(payload) => (
            descriptor.method(),
            standard::build_standard_body(descriptor.method(), payload)?,
        ),
        Payload::Binary(source) => (
            descriptor.method(),
            binary::build_binary_body(descriptor.method(), source).await?,
        ),
        Payload::Multipart(parts) => (
            Method::Post,
            WireBody::Multipart(multipart::build_multipart_body(parts).await?),
        ),
    };

    // The encoded body owns its Content-Type (multipart needs its boundary).
    if body.content_type().is_some() || matches!(body, WireBody::Multipart(_)) {
        headers.remove(CONTENT_TYPE);
    }

    Ok(WireRequest {
        method,
        url: descriptor.uri().clone(),
        headers,
        body_headers,
        body,
    })
}

impl WireRequest {
    /// Bind this request to a transport client.
    ///
    /// With [`ReadMode::FullBody`] the descriptor timeout covers the whole
    /// exchange, body included. With [`ReadMode::HeadersOnly`] it is left off
    /// the request; [`WireRequest::send`] bounds the wait for headers instead.
    pub fn into_request_builder(
        self,
        transport: &TransportClient,
        mode: ReadMode,
    ) -> Result<reqwest::RequestBuilder, WireError> {
        let mut rb = transport
            .client
            .request(self.method.to_reqwest(), self.url)
            .headers(self.headers);
        if let (Some(timeout), ReadMode::FullBody) = (transport.request_timeout, mode) {
            rb = rb.timeout(timeout);
        }

        rb = match self.body {
            WireBody::Empty => rb,
            WireBody::Bytes {
                content,
                content_type,
            } => {
                if let Some(content_type) = content_type {
                    rb = rb.header(CONTENT_TYPE, content_type);
                }
                rb.body(content)
            }
            WireBody::Stream(body) => rb.body(body),
            WireBody::Multipart(multipart) => rb.multipart(multipart.into_form()?),
        };

        Ok(rb.headers(self.body_headers))
    }

    /// Send this request and wait for the response headers.
    ///
    /// A streamed response outlives the descriptor timeout once its headers
    /// have arrived.
    pub async fn send(
        self,
        transport: &TransportClient,
        mode: ReadMode,
    ) -> Result<reqwest::Response, WireError> {
        let rb = self.into_request_builder(transport, mode)?;
        match (transport.request_timeout, mode) {
            (Some(timeout), ReadMode::HeadersOnly) => tokio::time::timeout(timeout, rb.send())
                .await
                .map_err(|_| {
                    WireError::HttpError(format!(
                        "timed out after {}ms waiting for response headers",
                        timeout.as_millis()
                    ))
                })?
                .map_err(WireError::from),
            _ => Ok(rb.send().await?),
        }
    }
}

#[cfg(test)]
mod tests;
