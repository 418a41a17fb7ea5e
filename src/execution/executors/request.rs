//! Request Executor
//!
//! Runs a [`RequestDescriptor`] to a classified [`ResponsePackage`].
//!
//! Each attempt builds a fresh wire request, sends it with a client chosen by
//! the client policy and reads the response per the expected shape. A 429 on a
//! non-multipart request is replayed after the `Retry-After` delta (or the
//! fallback delay) while the retry budget lasts; the last response is returned
//! as-is, so an exhausted budget surfaces as `TooManyRequests`.
//!
//! Transport faults are logged, reported to interceptors and returned as
//! [`WireError::HttpError`]. Dropping the returned future cancels the call,
//! including a pending retry sleep.

use super::http_request::build_wire_request;
use super::materialize::{Received, materialize};
use crate::config::ExecutorConfig;
use crate::error::WireError;
use crate::execution::http::client::ClientFactory;
use crate::execution::http::interceptor::{HttpInterceptor, HttpRequestContext};
use crate::retry::RateLimitPolicy;
use crate::types::{ExpectedShape, RequestDescriptor, ResponsePackage};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Position in the retry sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptState {
    /// Zero-based attempt number.
    pub attempt: u32,
    pub retries_left: u32,
}

impl AttemptState {
    pub const fn initial(max_retries: u32) -> Self {
        Self {
            attempt: 0,
            retries_left: max_retries,
        }
    }

    pub const fn next(self) -> Self {
        Self {
            attempt: self.attempt + 1,
            retries_left: self.retries_left.saturating_sub(1),
        }
    }
}

/// Outcome of one attempt.
#[derive(Debug)]
pub enum Step {
    Retry { delay: Duration, next: AttemptState },
    Done(ResponsePackage),
}

/// Executes request descriptors.
#[derive(Clone)]
pub struct RequestExecutor {
    config: ExecutorConfig,
    policy: RateLimitPolicy,
    clients: ClientFactory,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl RequestExecutor {
    /// Create an executor. Fails only if a shared client cannot be built.
    pub fn new(config: ExecutorConfig) -> Result<Self, WireError> {
        Ok(Self {
            policy: RateLimitPolicy::from_config(&config),
            clients: ClientFactory::new(&config)?,
            config,
            interceptors: Vec::new(),
        })
    }

    /// Register an interceptor; hooks run in registration order.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Execute `descriptor` and read the response per `shape`.
    pub async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        shape: ExpectedShape,
    ) -> Result<ResponsePackage, WireError> {
        let ctx = HttpRequestContext::for_descriptor(descriptor, shape);
        let span = tracing::debug_span!(
            target: "apiwire::http",
            "execute",
            request_id = %ctx.request_id,
            method = %descriptor.method(),
            url = %descriptor.uri(),
            variant = descriptor.variant().as_str(),
        );

        async {
            let mut state = AttemptState::initial(self.policy.max_retries);
            loop {
                match self.attempt(&ctx, descriptor, shape, state).await {
                    Ok(Step::Done(package)) => {
                        tracing::debug!(target: "apiwire::http", status = package.status_code, semantic = %package.status, attempts = state.attempt + 1, "request completed");
                        return Ok(package);
                    }
                    Ok(Step::Retry { delay, next }) => {
                        tokio::time::sleep(delay).await;
                        state = next;
                    }
                    Err(e) => {
                        if e.is_transport() {
                            tracing::error!(target: "apiwire::http", error = %e, attempt = state.attempt, "transport failure");
                        }
                        for it in &self.interceptors {
                            it.on_error(&ctx, &e);
                        }
                        return Err(e);
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Execute and buffer the body as text.
    pub async fn execute_text(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<ResponsePackage, WireError> {
        self.execute(descriptor, ExpectedShape::Text).await
    }

    /// Execute and return the open body stream on success.
    pub async fn execute_stream(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<ResponsePackage, WireError> {
        self.execute(descriptor, ExpectedShape::ByteStream).await
    }

    async fn attempt(
        &self,
        ctx: &HttpRequestContext,
        descriptor: &RequestDescriptor,
        shape: ExpectedShape,
        state: AttemptState,
    ) -> Result<Step, WireError> {
        let wire = build_wire_request(descriptor).await?;
        let transport = self.clients.client_for(descriptor)?;
        for it in &self.interceptors {
            it.on_before_send(ctx, state.attempt, &wire);
        }

        let mode = shape.read_mode();
        let response = wire.send(&transport, mode).await?;
        let received = Received::read(response, mode).await?;
        let status_code = received.status_code();
        for it in &self.interceptors {
            it.on_response(ctx, status_code, received.headers());
        }

        if let Some(delay) = self.policy.retry_delay(
            status_code,
            descriptor.variant(),
            state.retries_left,
            received.headers(),
        ) {
            let next = state.next();
            tracing::warn!(target: "apiwire::http", status = status_code, retries_left = next.retries_left, delay_ms = delay.as_millis() as u64, "rate limited, retrying");
            for it in &self.interceptors {
                it.on_retry(ctx, status_code, next.retries_left, delay);
            }
            // Release the connection before sleeping.
            drop(received);
            return Ok(Step::Retry { delay, next });
        }

        Ok(Step::Done(materialize(received, shape).await?))
    }
}

/// Execute with a one-off executor built from the default configuration.
pub async fn execute_request(
    descriptor: &RequestDescriptor,
    shape: ExpectedShape,
) -> Result<ResponsePackage, WireError> {
    RequestExecutor::new(ExecutorConfig::default())?
        .execute(descriptor, shape)
        .await
}
