//! Executor configuration
//!
//! `ExecutorConfig` holds the few knobs the execution engine exposes. The
//! defaults reproduce the documented behavior: three rate-limit retries, a
//! 2000 ms fallback delay and a fresh transport client for every attempt.

use crate::defaults;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How transport clients are obtained for each attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientPolicy {
    /// Build a new client for every attempt. Nothing is pooled or shared.
    #[default]
    PerRequest,
    /// Reuse long-lived clients (and their connection pools) across calls.
    Shared,
}

impl ClientPolicy {
    /// Parse the value of `APIWIRE_CLIENT_POLICY`.
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "shared" | "pooled" | "pool" => Self::Shared,
            _ => Self::PerRequest,
        }
    }
}

/// Execution engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Retries allowed after the first attempt on a 429 response.
    pub max_retries: u32,
    /// Delay used when `Retry-After` carries no delta.
    #[serde(with = "duration_millis_serde")]
    pub fallback_retry_delay: Duration,
    /// Redirect hops followed for descriptors that allow redirects.
    pub max_redirects: usize,
    /// Connection establishment timeout.
    #[serde(with = "duration_option_millis_serde")]
    pub connect_timeout: Option<Duration>,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
    /// Transport client reuse policy.
    pub client_policy: ClientPolicy,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        let client_policy = std::env::var(defaults::http::CLIENT_POLICY_ENV)
            .map(|v| ClientPolicy::from_env_value(&v))
            .unwrap_or_default();
        Self {
            max_retries: defaults::retry::MAX_RATE_LIMIT_RETRIES,
            fallback_retry_delay: defaults::retry::FALLBACK_RETRY_DELAY,
            max_redirects: defaults::http::MAX_REDIRECTS,
            connect_timeout: None,
            user_agent: Some(defaults::http::USER_AGENT.to_string()),
            client_policy,
        }
    }
}

impl ExecutorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rate-limit retry budget
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay used when `Retry-After` is absent
    pub const fn with_fallback_retry_delay(mut self, delay: Duration) -> Self {
        self.fallback_retry_delay = delay;
        self
    }

    pub const fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub const fn with_client_policy(mut self, policy: ClientPolicy) -> Self {
        self.client_policy = policy;
        self
    }
}

mod duration_millis_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

mod duration_option_millis_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => (d.as_millis() as u64).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis: Option<u64> = Option::deserialize(deserializer)?;
        Ok(millis.map(Duration::from_millis))
    }
}
