//! Core types: request descriptors, response packages and their parts.

pub mod body;
pub mod descriptor;
pub mod method;
pub mod response;
pub mod status;

pub use body::{BodySource, ByteStream, StreamFactory};
pub use descriptor::{
    FilePart, MultipartPart, Payload, RawPayload, RequestDescriptor, RequestDescriptorBuilder,
    RequestVariant, StandardPayload,
};
pub use method::Method;
pub use response::{ExpectedShape, ReadMode, ResponseBody, ResponsePackage};
pub use status::SemanticStatus;

static_assertions::assert_impl_all!(RequestDescriptor: Send, Sync, Clone);
static_assertions::assert_impl_all!(BodySource: Send, Sync, Clone);
static_assertions::assert_impl_all!(ResponsePackage: Send);
