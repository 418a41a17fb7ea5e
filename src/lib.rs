//! apiwire
//!
//! Request execution engine for remote HTTP APIs. A caller describes a call as a
//! [`RequestDescriptor`]; the [`RequestExecutor`] turns it into wire requests,
//! retries rate-limited attempts and returns a classified [`ResponsePackage`].
#![deny(unsafe_code)]

pub mod config;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod retry;
pub mod types;
pub mod utils;

pub use config::{ClientPolicy, ExecutorConfig};
pub use error::{ErrorCategory, WireError};
pub use execution::executors::{RequestExecutor, execute_request};
pub use execution::http::{HttpInterceptor, HttpRequestContext, LoggingInterceptor};
pub use retry::RateLimitPolicy;
pub use types::{
    BodySource, ByteStream, ExpectedShape, FilePart, Method, MultipartPart, RequestDescriptor,
    RequestDescriptorBuilder, RequestVariant, ResponseBody, ResponsePackage, SemanticStatus,
};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WireError>;
