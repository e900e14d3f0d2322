//! Byte source abstraction for file content.
//!
//! This module provides `ByteSource`, which lets the engine read a file's
//! content from a path, an in-memory buffer, or an async stream. Metadata
//! such as the file name lives in [`FileDescriptor`](crate::core::FileDescriptor).

use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::io::AsyncRead;
use pin_project_lite::pin_project;

/// Where the engine reads a file's content from.
///
/// # Examples
///
/// ```rust
/// use scanverdict::core::ByteSource;
///
/// let source = ByteSource::from_path("/uploads/report.txt");
/// assert!(source.is_path());
///
/// let source = ByteSource::from_bytes(b"hello".to_vec());
/// assert_eq!(source.size_hint(), Some(5));
/// ```
pub enum ByteSource {
    /// A file path on disk.
    Path(PathBuf),

    /// In-memory bytes.
    Bytes(Vec<u8>),

    /// An async stream of bytes.
    ///
    /// A stream can be read once. Clones share the reader, and once any of
    /// them has been hashed the others fail with an I/O error.
    Stream {
        /// The async reader, taken out on first read.
        reader: Arc<tokio::sync::Mutex<Option<Box<dyn AsyncRead + Send + Unpin>>>>,
        /// Optional size hint.
        size_hint: Option<u64>,
    },
}

impl std::fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Bytes(data) => f
                .debug_struct("Bytes")
                .field("data_len", &data.len())
                .finish(),
            Self::Stream { size_hint, .. } => f
                .debug_struct("Stream")
                .field("size_hint", size_hint)
                .finish_non_exhaustive(),
        }
    }
}

impl Clone for ByteSource {
    fn clone(&self) -> Self {
        match self {
            Self::Path(path) => Self::Path(path.clone()),
            Self::Bytes(data) => Self::Bytes(data.clone()),
            Self::Stream { reader, size_hint } => Self::Stream {
                reader: Arc::clone(reader),
                size_hint: *size_hint,
            },
        }
    }
}

impl ByteSource {
    /// Creates a `ByteSource` from a file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Creates a `ByteSource` from bytes.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(data.into())
    }

    /// Creates a `ByteSource` from an async reader.
    pub fn from_stream(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self::Stream {
            reader: Arc::new(tokio::sync::Mutex::new(Some(Box::new(reader)))),
            size_hint: None,
        }
    }

    /// Sets the size hint for stream sources.
    pub fn with_size_hint(mut self, size: u64) -> Self {
        if let Self::Stream { size_hint, .. } = &mut self {
            *size_hint = Some(size);
        }
        self
    }

    /// Returns the size in bytes, if known without I/O.
    pub fn size_hint(&self) -> Option<u64> {
        match self {
            Self::Path(_) => None,
            Self::Bytes(data) => Some(data.len() as u64),
            Self::Stream { size_hint, .. } => *size_hint,
        }
    }

    /// Returns `true` if this is a path-based source.
    pub fn is_path(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    /// Returns the path, if this is a path-based source.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Returns `true` if this is a stream whose reader has already been taken.
    pub fn is_consumed(&self) -> bool {
        match self {
            Self::Stream { reader, .. } => reader.try_lock().is_ok_and(|r| r.is_none()),
            _ => false,
        }
    }

    /// Returns the bytes, if this is an in-memory source.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(data) => Some(data),
            _ => None,
        }
    }
}

impl From<PathBuf> for ByteSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ByteSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ByteSource {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }
}

impl From<&[u8]> for ByteSource {
    fn from(data: &[u8]) -> Self {
        Self::Bytes(data.to_vec())
    }
}

pin_project! {
    /// A wrapper that allows reading bytes as an async stream.
    pub struct BytesReader {
        data: Vec<u8>,
        position: usize,
    }
}

impl BytesReader {
    /// Creates a new `BytesReader` from the given bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, position: 0 }
    }
}

impl AsyncRead for BytesReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<std::io::Result<usize>> {
        let this = self.project();
        let remaining = &this.data[*this.position..];
        let to_copy = std::cmp::min(buf.len(), remaining.len());
        buf[..to_copy].copy_from_slice(&remaining[..to_copy]);
        *this.position += to_copy;
        Poll::Ready(Ok(to_copy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_source_from_path() {
        let source = ByteSource::from_path("/uploads/file.exe");
        assert!(source.is_path());
        assert_eq!(source.as_path(), Some(Path::new("/uploads/file.exe")));
        assert_eq!(source.size_hint(), None);
    }

    #[test]
    fn test_byte_source_from_bytes() {
        let data = vec![1, 2, 3, 4];
        let source = ByteSource::from_bytes(data.clone());
        assert_eq!(source.as_bytes(), Some(data.as_slice()));
        assert_eq!(source.size_hint(), Some(4));
    }

    #[test]
    fn test_stream_size_hint_and_debug() {
        let source = ByteSource::from_stream(BytesReader::new(vec![0; 10])).with_size_hint(10);
        assert_eq!(source.size_hint(), Some(10));
        assert!(format!("{:?}", source).starts_with("Stream"));

        // Size hints only apply to streams.
        let source = ByteSource::from_bytes(vec![0; 3]).with_size_hint(99);
        assert_eq!(source.size_hint(), Some(3));
    }

    #[tokio::test]
    async fn test_bytes_reader_reads_everything() {
        use futures::AsyncReadExt;

        let mut reader = BytesReader::new(b"abcdef".to_vec());
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, b"abcdef");
    }
}
