//! Rate-limit Retry Policy
//!
//! Decides whether a response is replayed and how long to wait first. Only a
//! 429 on a non-multipart request with budget left is retried; the wait is the
//! server's `Retry-After` delta, or a fixed fallback.

use crate::config::ExecutorConfig;
use crate::defaults;
use crate::types::RequestVariant;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// Status code that triggers a retry.
pub const TOO_MANY_REQUESTS: u16 = 429;

/// Retry policy configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
    /// Delay used when `Retry-After` carries no delta
    pub fallback_delay: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_retries: defaults::retry::MAX_RATE_LIMIT_RETRIES,
            fallback_delay: defaults::retry::FALLBACK_RETRY_DELAY,
        }
    }
}

impl RateLimitPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ExecutorConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            fallback_delay: config.fallback_retry_delay,
        }
    }

    /// Set maximum retries
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set fallback delay
    pub const fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    /// Delay before the next attempt, or `None` when the response is terminal.
    ///
    /// Inspects the raw status code; semantic classification happens later,
    /// once, on the terminal response.
    pub fn retry_delay(
        &self,
        status: u16,
        variant: RequestVariant,
        retries_left: u32,
        headers: &HeaderMap,
    ) -> Option<Duration> {
        if status == TOO_MANY_REQUESTS && variant.allows_rate_limit_retry() && retries_left > 0 {
            Some(self.delay_for(headers))
        } else {
            None
        }
    }

    /// `Retry-After` delta if present, otherwise the fallback delay.
    pub fn delay_for(&self, headers: &HeaderMap) -> Duration {
        retry_after_delta(headers).unwrap_or(self.fallback_delay)
    }
}

/// Parse a delta-seconds `Retry-After` header.
///
/// HTTP-date and malformed values yield `None`.
pub fn retry_after_delta(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    raw.parse::<u64>().ok().map(Duration::from_secs)
}
