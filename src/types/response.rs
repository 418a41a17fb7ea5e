//! Response packages returned by the executor.

use super::body::ByteStream;
use super::status::SemanticStatus;
use crate::error::WireError;
use crate::execution::http::headers::headermap_to_hashmap;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;

/// The result shape a caller expects from an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectedShape {
    /// Read the whole body and decode it as text.
    #[default]
    Text,
    /// Hand back the open body stream.
    ///
    /// Only a `Success` response is streamed. Any other status is buffered as
    /// text so the caller can inspect the error body.
    ByteStream,
}

impl ExpectedShape {
    pub const fn read_mode(&self) -> ReadMode {
        match self {
            Self::Text => ReadMode::FullBody,
            Self::ByteStream => ReadMode::HeadersOnly,
        }
    }
}

/// How far the transport reads a response before control returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    HeadersOnly,
    FullBody,
}

/// Response content: exactly one of text or an open stream.
pub enum ResponseBody {
    Text(String),
    Stream(ByteStream),
}

impl ResponseBody {
    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Stream(_) => None,
        }
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A classified response plus a slot for the caller's typed result.
///
/// The caller owns a stream body and releases it by dropping it.
#[derive(Debug)]
pub struct ResponsePackage<T = ()> {
    pub status_code: u16,
    pub status: SemanticStatus,
    pub headers: HeaderMap,
    pub body: ResponseBody,
    pub result: Option<T>,
}

impl ResponsePackage<()> {
    pub fn new(status_code: u16, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            status_code,
            status: SemanticStatus::from_code(status_code),
            headers,
            body,
            result: None,
        }
    }
}

impl<T> ResponsePackage<T> {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Buffered text body, if the body was buffered.
    pub fn text(&self) -> Option<&str> {
        self.body.as_text()
    }

    /// Take the open stream, if the body was streamed.
    pub fn into_stream(self) -> Option<ByteStream> {
        match self.body {
            ResponseBody::Stream(stream) => Some(stream),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn header_map(&self) -> HashMap<String, String> {
        headermap_to_hashmap(&self.headers)
    }

    /// Attach a typed result.
    pub fn with_result<U>(self, result: U) -> ResponsePackage<U> {
        ResponsePackage {
            status_code: self.status_code,
            status: self.status,
            headers: self.headers,
            body: self.body,
            result: Some(result),
        }
    }

    /// Decode a `Success` text body as JSON into the result slot.
    ///
    /// Non-success packages and empty bodies are passed through with an empty
    /// slot. A streamed body is left untouched.
    pub fn decode_json<U: DeserializeOwned>(self) -> Result<ResponsePackage<U>, WireError> {
        let result = match (&self.body, self.status.is_success()) {
            (ResponseBody::Text(text), true) if !text.trim().is_empty() => {
                Some(serde_json::from_str::<U>(text)?)
            }
            _ => None,
        };
        Ok(ResponsePackage {
            status_code: self.status_code,
            status: self.status,
            headers: self.headers,
            body: self.body,
            result,
        })
    }
}
