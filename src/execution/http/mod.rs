//! HTTP Utilities
//!
//! - Transport client construction and reuse policy
//! - Header placement
//! - HTTP interceptors

pub mod client;
pub mod headers;
pub mod interceptor;

pub use client::{ClientFactory, TransportClient, TransportSettings, build_http_client};
pub use headers::{DescriptorHeaders, is_body_header, split_descriptor_headers};
pub use interceptor::{HttpInterceptor, HttpRequestContext, LoggingInterceptor};
