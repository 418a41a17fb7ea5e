//! HTTP Interceptor interfaces
//!
//! Interceptors observe an execution: each wire request before it is sent,
//! each response, each rate-limit retry and each transport fault. Hooks are
//! called in registration order and must stay cheap; they cannot alter the
//! request or the outcome.

use crate::error::WireError;
use crate::execution::executors::http_request::WireRequest;
use crate::types::{ExpectedShape, Method, RequestDescriptor, RequestVariant};
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Context passed to interceptors describing the execution.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    pub request_id: String,
    pub method: Method,
    pub url: String,
    pub variant: RequestVariant,
    pub stream: bool,
}

impl HttpRequestContext {
    pub fn for_descriptor(descriptor: &RequestDescriptor, shape: ExpectedShape) -> Self {
        Self {
            request_id: generate_request_id(),
            method: descriptor.method(),
            url: descriptor.uri().to_string(),
            variant: descriptor.variant(),
            stream: shape == ExpectedShape::ByteStream,
        }
    }
}

/// Generate a unique id for one execution.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called with every freshly built wire request, before it is sent.
    /// `attempt` starts at 0.
    fn on_before_send(&self, _ctx: &HttpRequestContext, _attempt: u32, _request: &WireRequest) {}

    /// Called when response headers arrive, for every attempt.
    fn on_response(&self, _ctx: &HttpRequestContext, _status: u16, _headers: &HeaderMap) {}

    /// Called when a 429 is about to be retried after `delay`.
    fn on_retry(
        &self,
        _ctx: &HttpRequestContext,
        _status: u16,
        _retries_left: u32,
        _delay: Duration,
    ) {
    }

    /// Called when a fault aborts the execution.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &WireError) {}
}

/// A simple logging interceptor backed by `tracing` (no header values or bodies).
#[derive(Clone, Debug, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(&self, ctx: &HttpRequestContext, attempt: u32, request: &WireRequest) {
        tracing::debug!(target: "apiwire::http", request_id=%ctx.request_id, method=%request.method, url=%request.url, attempt, body=%request.body.kind(), "sending request");
    }

    fn on_response(&self, ctx: &HttpRequestContext, status: u16, _headers: &HeaderMap) {
        tracing::debug!(target: "apiwire::http", request_id=%ctx.request_id, url=%ctx.url, status, "response received");
    }

    fn on_retry(&self, ctx: &HttpRequestContext, status: u16, retries_left: u32, delay: Duration) {
        tracing::debug!(target: "apiwire::http", request_id=%ctx.request_id, url=%ctx.url, status, retries_left, delay_ms = delay.as_millis() as u64, "retry scheduled");
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &WireError) {
        tracing::debug!(target: "apiwire::http", request_id=%ctx.request_id, url=%ctx.url, stream=%ctx.stream, err=%error, "request error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_reflects_descriptor_and_shape() {
        let desc = RequestDescriptor::builder(Method::Put, "https://api.example.com/f/1")
            .binary(b"abc".to_vec())
            .build()
            .unwrap();
        let ctx = HttpRequestContext::for_descriptor(&desc, ExpectedShape::ByteStream);
        assert_eq!(ctx.method, Method::Put);
        assert_eq!(ctx.variant, RequestVariant::Binary);
        assert!(ctx.stream);
        assert_eq!(ctx.url, "https://api.example.com/f/1");
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
