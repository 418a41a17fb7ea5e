//! Retry module
//! - policy.rs: rate-limit retry decisions and `Retry-After` parsing

pub mod policy;

pub use policy::*;
