use thiserror::Error;

/// Errors raised while turning a descriptor into a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The descriptor names a verb outside GET/PUT/POST/DELETE/OPTIONS.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Network, TLS, timeout or body-read failure reported by the transport.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// A header name or value could not be represented.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The descriptor cannot be turned into a wire request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The transport client could not be constructed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A text body could not be decoded into the requested type.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Local I/O failure while producing a request body.
    #[error("IO error: {0}")]
    IoError(String),
}

/// Coarse grouping of `WireError` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Programmer or configuration mistakes; never transient.
    Configuration,
    /// Faults of the underlying connection.
    Transport,
    /// Descriptor content that cannot be encoded.
    Request,
    /// Response or local data that could not be decoded.
    Decode,
}

impl WireError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedMethod(_) | Self::ConfigurationError(_) => {
                ErrorCategory::Configuration
            }
            Self::HttpError(_) => ErrorCategory::Transport,
            Self::InvalidHeader(_) | Self::InvalidRequest(_) | Self::IoError(_) => {
                ErrorCategory::Request
            }
            Self::JsonError(_) => ErrorCategory::Decode,
        }
    }

    /// Whether this error came from the transport rather than from local input.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_cover_all_variants() {
        assert_eq!(
            WireError::UnsupportedMethod("PATCH".into()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            WireError::HttpError("connection reset".into()).category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            WireError::InvalidRequest("no parts".into()).category(),
            ErrorCategory::Request
        );
        assert_eq!(
            WireError::JsonError("eof".into()).category(),
            ErrorCategory::Decode
        );
    }

    #[test]
    fn only_http_errors_are_transport_errors() {
        assert!(WireError::HttpError("timeout".into()).is_transport());
        assert!(!WireError::IoError("missing".into()).is_transport());
    }

    #[test]
    fn display_includes_payload() {
        let err = WireError::UnsupportedMethod("PATCH".into());
        assert_eq!(err.to_string(), "Unsupported HTTP method: PATCH");
    }
}
