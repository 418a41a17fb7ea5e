//! Default Configuration Values
//!
//! This module centralizes the default values used by the execution engine.

use std::time::Duration;

/// Rate-limit retry defaults
pub mod retry {
    use super::*;

    /// Retries allowed after the first attempt when the server answers 429.
    pub const MAX_RATE_LIMIT_RETRIES: u32 = 3;

    /// Delay used when a 429 response carries no usable `Retry-After` delta.
    pub const FALLBACK_RETRY_DELAY: Duration = Duration::from_millis(2000);
}

/// HTTP client default configurations
pub mod http {
    /// Redirect hops followed when a descriptor asks for redirects.
    pub const MAX_REDIRECTS: usize = 10;

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("apiwire/", env!("CARGO_PKG_VERSION"));

    /// Environment variable that selects the transport client policy.
    pub const CLIENT_POLICY_ENV: &str = "APIWIRE_CLIENT_POLICY";
}

/// Request body defaults
pub mod body {
    /// Media type used for a raw string payload without a content type.
    pub const TEXT_CONTENT_TYPE: &str = "text/plain";

    /// Charset used to encode raw string payloads.
    pub const CHARSET: &str = "utf-8";

    /// Media type of URL-encoded form parameters.
    pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

    /// Media type used for file parts whose type cannot be guessed.
    pub const OCTET_STREAM: &str = "application/octet-stream";
}
