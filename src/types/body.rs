//! Replayable request body sources and the response byte stream type.

use crate::error::WireError;
use bytes::Bytes;
use futures::Stream;
use std::fmt;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

/// An open stream of body bytes.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, WireError>> + Send>>;

/// Produces a fresh `ByteStream` each time it is called.
pub type StreamFactory = Arc<dyn Fn() -> Result<ByteStream, WireError> + Send + Sync>;

/// Where the bytes of a binary body or a file part come from.
///
/// A wire request is rebuilt for every attempt, so a source must be able to
/// yield its content more than once. Each variant opens a new reader on
/// every call to [`BodySource::open`].
#[derive(Clone)]
pub enum BodySource {
    /// In-memory content; cloned per attempt.
    Bytes(Bytes),
    /// A local file, reopened per attempt.
    File(PathBuf),
    /// A caller-provided factory invoked per attempt.
    Stream(StreamFactory),
}

impl BodySource {
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::Bytes(bytes.into())
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn from_stream_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<ByteStream, WireError> + Send + Sync + 'static,
    {
        Self::Stream(Arc::new(factory))
    }

    /// File name of a file-backed source, if any.
    pub fn file_name(&self) -> Option<String> {
        match self {
            Self::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            _ => None,
        }
    }

    /// In-memory content, when the source has it without I/O.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Open the source as a transport body.
    pub async fn open(&self) -> Result<reqwest::Body, WireError> {
        match self {
            Self::Bytes(bytes) => Ok(reqwest::Body::from(bytes.clone())),
            Self::File(path) => open_file(path).await,
            Self::Stream(factory) => {
                let stream = factory()?;
                Ok(reqwest::Body::wrap_stream(stream))
            }
        }
    }
}

async fn open_file(path: &Path) -> Result<reqwest::Body, WireError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| WireError::IoError(format!("{}: {e}", path.display())))?;
    Ok(reqwest::Body::wrap_stream(ReaderStream::new(file)))
}

impl fmt::Debug for BodySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Bytes> for BodySource {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<u8>> for BodySource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes.into())
    }
}

impl From<&'static [u8]> for BodySource {
    fn from(bytes: &'static [u8]) -> Self {
        Self::Bytes(Bytes::from_static(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn bytes_source_reopens_with_same_content() {
        let source = BodySource::from_bytes("payload");
        for _ in 0..2 {
            let body = tokio_test::block_on(source.open()).unwrap();
            assert_eq!(body.as_bytes(), Some(&b"payload"[..]));
        }
    }

    #[tokio::test]
    async fn stream_factory_is_invoked_per_open() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let source = BodySource::from_stream_factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let chunks = vec![Ok(Bytes::from_static(b"a")), Ok(Bytes::from_static(b"b"))];
            Ok(futures::stream::iter(chunks).boxed())
        });

        source.open().await.unwrap();
        source.open().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn file_source_reports_name_and_missing_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello").unwrap();
        let source = BodySource::from_file(file.path());
        assert!(source.file_name().is_some());
        assert!(source.open().await.is_ok());

        let missing = BodySource::from_file("/definitely/not/here.bin");
        match missing.open().await {
            Err(WireError::IoError(msg)) => assert!(msg.contains("here.bin")),
            other => panic!("expected IoError, got {other:?}"),
        }
    }
}
