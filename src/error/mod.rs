//! Error Handling Module
//!
//! - Core error type (`WireError`) and its coarse `ErrorCategory`
//! - Conversions from the transport, JSON and I/O error types
//!
//! HTTP-level outcomes (401, 403, 429, 5xx, ...) are never errors here: they
//! come back as a `SemanticStatus` on the `ResponsePackage`. `WireError` is
//! reserved for faults that prevent a response from being produced at all.
//!
//! # Example
//!
//! ```rust,ignore
//! use apiwire::error::{ErrorCategory, WireError};
//!
//! let error = WireError::UnsupportedMethod("PATCH".into());
//! assert_eq!(error.category(), ErrorCategory::Configuration);
//! assert!(!error.is_transport());
//! ```

mod conversions;
pub mod types;

pub use types::*;
