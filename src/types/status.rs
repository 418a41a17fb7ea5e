//! Semantic classification of HTTP status codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of a transport status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticStatus {
    Success,
    Pending,
    Unauthorized,
    Forbidden,
    TooManyRequests,
    Error,
}

impl SemanticStatus {
    /// Total mapping from a numeric status code.
    ///
    /// 302 is `Success`: with redirects disabled the caller reads the target
    /// from the `Location` header.
    pub const fn from_code(code: u16) -> Self {
        match code {
            200 | 201 | 204 | 302 => Self::Success,
            202 => Self::Pending,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            429 => Self::TooManyRequests,
            _ => Self::Error,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Pending => "pending",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::TooManyRequests => "too_many_requests",
            Self::Error => "error",
        }
    }
}

impl From<u16> for SemanticStatus {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

impl From<reqwest::StatusCode> for SemanticStatus {
    fn from(status: reqwest::StatusCode) -> Self {
        Self::from_code(status.as_u16())
    }
}

impl fmt::Display for SemanticStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
