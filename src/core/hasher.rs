//! Content hashing with SHA-256.
//!
//! SHA-256 is the key the threat-intelligence service indexes files by, so
//! it is the only digest computed. Sources are streamed in fixed-size chunks
//! and never need to be resident in memory as a whole.

use crate::core::error::ScanError;
use crate::core::input::ByteSource;
use crate::core::types::ContentDigest;

use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// Computes content digests.
///
/// The digest depends only on the bytes; file name and size play no part.
///
/// # Examples
///
/// ```rust
/// use scanverdict::core::ContentHasher;
///
/// let hasher = ContentHasher::new();
/// let digest = hasher.hash_bytes(b"hello world");
/// assert_eq!(
///     digest.as_str(),
///     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentHasher;

impl ContentHasher {
    /// Creates a new `ContentHasher`.
    pub fn new() -> Self {
        Self
    }

    /// Computes the digest of bytes already in memory.
    pub fn hash_bytes(&self, data: &[u8]) -> ContentDigest {
        finish(&Sha256::digest(data))
    }

    /// Computes the digest from a synchronous reader.
    pub fn hash_reader<R: Read>(&self, reader: &mut R) -> Result<ContentDigest, ScanError> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }
        Ok(finish(&hasher.finalize()))
    }

    /// Computes the digest of a file on disk without blocking the runtime.
    pub async fn hash_file(&self, path: &Path) -> Result<ContentDigest, ScanError> {
        use tokio::io::AsyncReadExt;

        let mut file = tokio::fs::File::open(path)
            .await
            .map_err(|e| ScanError::from_path_io(path, e))?;

        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];
        loop {
            let n = file.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
        Ok(finish(&hasher.finalize()))
    }

    /// Computes the digest of any `ByteSource`.
    pub async fn hash_source(&self, source: &ByteSource) -> Result<ContentDigest, ScanError> {
        match source {
            ByteSource::Path(path) => self.hash_file(path).await,
            ByteSource::Bytes(data) => Ok(self.hash_bytes(data)),
            ByteSource::Stream { reader, .. } => {
                let taken = reader.lock().await.take();
                let mut reader = taken.ok_or_else(|| {
                    ScanError::Io(std::io::Error::other("stream source already consumed"))
                })?;
                let mut hasher = Sha256::new();
                let mut buffer = vec![0u8; CHUNK_SIZE];
                loop {
                    let n = futures::AsyncReadExt::read(&mut reader, &mut buffer).await?;
                    if n == 0 {
                        break;
                    }
                    hasher.update(&buffer[..n]);
                }
                Ok(finish(&hasher.finalize()))
            }
        }
    }
}

fn finish(bytes: &[u8]) -> ContentDigest {
    let hex = bytes.iter().map(|b| format!("{:02x}", b)).collect::<String>();
    ContentDigest::from_hex(hex)
}
