//! Core types and traits for the scanverdict library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`types`] - `FileDescriptor`, `ContentDigest`, `RemoteVerdict`, `Classification`
//! - [`traits`] - The `LookupClient` trait and its `Hit | Miss` outcome
//! - [`error`] - Structured error types
//! - [`input`] - Byte source abstraction
//! - [`hasher`] - SHA-256 content hashing
//! - [`result`] - The `ScanResult` returned to callers

pub mod error;
pub mod hasher;
pub mod input;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types at the core level
pub use error::{EngineResult, ScanError};
pub use hasher::ContentHasher;
pub use input::{ByteSource, BytesReader};
pub use result::{ScanDetails, ScanResult};
pub use traits::{ArcLookupClient, LookupClient, LookupOutcome, MissReason};
pub use types::{
    Classification, ContentDigest, FileDescriptor, RemoteVerdict, ScanSource, Stage,
};
