//! Request descriptors
//!
//! A `RequestDescriptor` is an immutable description of one HTTP call. Domain
//! collaborators build it, the executor consumes it. The payload is a closed
//! sum type, so the request variant is always derived from the payload and can
//! never disagree with it.

use super::body::BodySource;
use super::method::Method;
use crate::error::WireError;
use std::time::Duration;

/// Which encoding strategy a descriptor needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestVariant {
    Standard,
    Binary,
    Multipart,
}

impl RequestVariant {
    /// Multipart sources are treated as single-use, so only the other
    /// variants are replayed on 429.
    pub const fn allows_rate_limit_retry(&self) -> bool {
        !matches!(self, Self::Multipart)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Binary => "binary",
            Self::Multipart => "multipart",
        }
    }
}

/// A raw string body with its media type and charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    pub content: String,
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
}

impl RawPayload {
    /// Whitespace-only content counts as absent.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Payload of a standard request: a raw string body or form parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardPayload {
    pub raw: Option<RawPayload>,
    /// Ordered form parameters, used when no raw payload is present.
    pub form: Vec<(String, String)>,
}

/// A file part of a multipart body.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub source: BodySource,
}

impl FilePart {
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        source: impl Into<BodySource>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            content_type: None,
            source: source.into(),
        }
    }

    /// File part backed by a path; the file name is taken from the path.
    pub fn from_path(name: impl Into<String>, path: impl Into<std::path::PathBuf>) -> Self {
        let source = BodySource::from_file(path);
        let file_name = source.file_name().unwrap_or_default();
        Self {
            name: name.into(),
            file_name,
            content_type: None,
            source,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// One part of a multipart body.
#[derive(Debug, Clone)]
pub enum MultipartPart {
    Text { name: String, value: String },
    File(FilePart),
}

/// Variant-specific payload of a descriptor.
#[derive(Debug, Clone)]
pub enum Payload {
    Standard(StandardPayload),
    Binary(BodySource),
    Multipart(Vec<MultipartPart>),
}

impl Payload {
    pub fn variant(&self) -> RequestVariant {
        match self {
            Self::Standard(_) => RequestVariant::Standard,
            Self::Binary(_) => RequestVariant::Binary,
            Self::Multipart(_) => RequestVariant::Multipart,
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::Standard(StandardPayload::default())
    }
}

/// Immutable description of an HTTP request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    uri: reqwest::Url,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    follow_redirects: bool,
    payload: Payload,
}

impl RequestDescriptor {
    pub fn builder(method: Method, uri: impl Into<String>) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::new(method, uri)
    }

    /// Shorthand for a bodiless GET.
    pub fn get(uri: impl Into<String>) -> Result<Self, WireError> {
        Self::builder(Method::Get, uri).build()
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn uri(&self) -> &reqwest::Url {
        &self.uri
    }

    /// Headers in insertion order; a key may repeat.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn variant(&self) -> RequestVariant {
        self.payload.variant()
    }
}

/// Builder for [`RequestDescriptor`].
#[derive(Debug)]
pub struct RequestDescriptorBuilder {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    follow_redirects: bool,
    payload: Payload,
    conflict: Option<&'static str>,
}

impl RequestDescriptorBuilder {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: Vec::new(),
            timeout: None,
            follow_redirects: true,
            payload: Payload::default(),
            conflict: None,
        }
    }

    /// Append a header. Repeated keys are kept.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Raw string body for a standard request.
    pub fn raw_payload(
        mut self,
        content: impl Into<String>,
        content_type: Option<&str>,
        content_encoding: Option<&str>,
    ) -> Self {
        let raw = RawPayload {
            content: content.into(),
            content_type: content_type.map(str::to_string),
            content_encoding: content_encoding.map(str::to_string),
        };
        if let Some(standard) = self.standard_payload() {
            standard.raw = Some(raw);
        }
        self
    }

    /// Append a form parameter for a standard request.
    pub fn form_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let pair = (key.into(), value.into());
        if let Some(standard) = self.standard_payload() {
            standard.form.push(pair);
        }
        self
    }

    /// Make this a binary request with a single body part.
    pub fn binary(mut self, source: impl Into<BodySource>) -> Self {
        if self.payload_is_unset() {
            self.payload = Payload::Binary(source.into());
        } else {
            self.conflict = Some("binary");
        }
        self
    }

    /// Append a named string part; makes this a multipart request.
    pub fn multipart_text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_part(MultipartPart::Text {
            name: name.into(),
            value: value.into(),
        })
    }

    /// Append a file part; makes this a multipart request.
    pub fn multipart_file(self, part: FilePart) -> Self {
        self.push_part(MultipartPart::File(part))
    }

    pub fn build(self) -> Result<RequestDescriptor, WireError> {
        if let Some(kind) = self.conflict {
            return Err(WireError::InvalidRequest(format!(
                "{kind} payload cannot be combined with a {} payload",
                self.payload.variant().as_str()
            )));
        }
        let uri = reqwest::Url::parse(&self.uri)
            .map_err(|e| WireError::InvalidRequest(format!("invalid URI '{}': {e}", self.uri)))?;
        Ok(RequestDescriptor {
            method: self.method,
            uri,
            headers: self.headers,
            timeout: self.timeout,
            follow_redirects: self.follow_redirects,
            payload: self.payload,
        })
    }

    fn standard_payload(&mut self) -> Option<&mut StandardPayload> {
        match &mut self.payload {
            Payload::Standard(standard) => Some(standard),
            _ => {
                self.conflict = Some("standard");
                None
            }
        }
    }

    fn push_part(mut self, part: MultipartPart) -> Self {
        if self.payload_is_unset() {
            self.payload = Payload::Multipart(vec![part]);
        } else if let Payload::Multipart(parts) = &mut self.payload {
            parts.push(part);
        } else {
            self.conflict = Some("multipart");
        }
        self
    }

    fn payload_is_unset(&self) -> bool {
        matches!(&self.payload, Payload::Standard(standard) if *standard == StandardPayload::default())
    }
}
