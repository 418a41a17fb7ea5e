//! Executors Layer
//!
//! Wire request construction, the execution loop and response materialization.

pub mod http_request;
pub mod materialize;
pub mod request;

pub use http_request::{WireBody, WireRequest, build_wire_request};
pub use materialize::{Received, materialize};
pub use request::{AttemptState, RequestExecutor, Step, execute_request};
