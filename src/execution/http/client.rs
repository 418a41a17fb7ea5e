//! Transport client construction
//!
//! Every attempt obtains its `reqwest::Client` from a [`ClientFactory`]. The
//! factory's [`ClientPolicy`] makes reuse explicit:
//!
//! - `PerRequest` builds a new client for each attempt. No connection is ever
//!   reused, across descriptors or across retries of one descriptor.
//! - `Shared` builds one redirect-following and one non-following client up
//!   front and reuses their pools.
//!
//! Clients never carry a total timeout. The descriptor timeout travels on the
//! [`TransportClient`] and is applied when the request is sent, so that it can
//! stop at the response headers when the caller takes an open stream.
//!
//! Response decompression (gzip, deflate) is always enabled.

use crate::config::{ClientPolicy, ExecutorConfig};
use crate::error::WireError;
use crate::types::RequestDescriptor;
use std::time::Duration;

/// Client settings derived from a descriptor and the executor config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub gzip: bool,
    pub deflate: bool,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    pub connect_timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl TransportSettings {
    pub fn for_descriptor(descriptor: &RequestDescriptor, config: &ExecutorConfig) -> Self {
        Self {
            gzip: true,
            deflate: true,
            follow_redirects: descriptor.follow_redirects(),
            max_redirects: config.max_redirects,
            connect_timeout: config.connect_timeout,
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn redirect_policy(&self) -> reqwest::redirect::Policy {
        if self.follow_redirects {
            reqwest::redirect::Policy::limited(self.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        }
    }
}

/// Build an HTTP client from transport settings.
pub fn build_http_client(settings: &TransportSettings) -> Result<reqwest::Client, WireError> {
    let mut builder = reqwest::Client::builder()
        .gzip(settings.gzip)
        .deflate(settings.deflate)
        .redirect(settings.redirect_policy());

    if let Some(connect_timeout) = settings.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(user_agent) = &settings.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder
        .build()
        .map_err(|e| WireError::ConfigurationError(format!("Failed to create HTTP client: {e}")))
}

/// A client ready for one attempt.
#[derive(Debug, Clone)]
pub struct TransportClient {
    pub client: reqwest::Client,
    /// Descriptor timeout, applied per send; `None` leaves the transport default.
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
struct SharedClients {
    follow: reqwest::Client,
    no_follow: reqwest::Client,
}

/// Hands out transport clients according to the configured policy.
#[derive(Debug, Clone)]
pub struct ClientFactory {
    config: ExecutorConfig,
    shared: Option<SharedClients>,
}

impl ClientFactory {
    pub fn new(config: &ExecutorConfig) -> Result<Self, WireError> {
        let shared = match config.client_policy {
            ClientPolicy::PerRequest => None,
            ClientPolicy::Shared => {
                let base = TransportSettings {
                    gzip: true,
                    deflate: true,
                    follow_redirects: true,
                    max_redirects: config.max_redirects,
                    connect_timeout: config.connect_timeout,
                    user_agent: config.user_agent.clone(),
                };
                let no_follow = TransportSettings {
                    follow_redirects: false,
                    ..base.clone()
                };
                Some(SharedClients {
                    follow: build_http_client(&base)?,
                    no_follow: build_http_client(&no_follow)?,
                })
            }
        };
        Ok(Self {
            config: config.clone(),
            shared,
        })
    }

    pub fn policy(&self) -> ClientPolicy {
        self.config.client_policy
    }

    /// Client for one attempt of `descriptor`.
    pub fn client_for(&self, descriptor: &RequestDescriptor) -> Result<TransportClient, WireError> {
        match &self.shared {
            Some(shared) => {
                let client = if descriptor.follow_redirects() {
                    shared.follow.clone()
                } else {
                    shared.no_follow.clone()
                };
                Ok(TransportClient {
                    client,
                    request_timeout: descriptor.timeout(),
                })
            }
            None => {
                let settings = TransportSettings::for_descriptor(descriptor, &self.config);
                Ok(TransportClient {
                    client: build_http_client(&settings)?,
                    request_timeout: descriptor.timeout(),
                })
            }
        }
    }
}
