//! Execution Layer
//!
//! - `http`: transport clients, header handling and interceptors
//! - `executors`: wire request construction and the retrying execution loop

pub mod executors;
pub mod http;
