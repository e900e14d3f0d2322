//! # Scanverdict
//!
//! Classifies uploaded files as clean, suspicious or infected by looking up
//! their SHA-256 digest against a threat-intelligence service, with a
//! deterministic heuristic fallback when no verdict is available.
//!
//! ## Overview
//!
//! Every classification follows the same pipeline:
//!
//! - Hash the file content (SHA-256, streamed)
//! - Look the digest up once through a [`LookupClient`] (VirusTotal by default)
//! - On a hit, derive the classification from the engine counts
//! - On a miss, score the file name and size with a heuristic
//! - Synthesize a [`ScanResult`] that always serializes to the same JSON shape
//!
//! [`ScanEngine::classify`] never returns an error. Failures that cannot be
//! recovered become a result with `classification = "error"`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scanverdict::{ByteSource, EngineConfig, FileDescriptor, ScanEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = ScanEngine::builder()
//!         .with_config(EngineConfig::new().with_credential("api-key"))
//!         .build()?;
//!
//!     let file = FileDescriptor::new("invoice.pdf", 12);
//!     let result = engine
//!         .classify(file, ByteSource::from_bytes(b"%PDF-1.7 ...".to_vec()))
//!         .await;
//!
//!     println!("{}", result.to_json());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `default` - Includes the VirusTotal lookup client
//! - `virustotal` - VirusTotal v3 file-report lookups via `reqwest`
//!
//! ## Architecture
//!
//! - **Core**: Types, the lookup trait, hashing and error handling
//! - **Backends**: Lookup client implementations
//! - **Classify**: Verdict parsing, heuristic scoring and result synthesis
//! - **Engine**: Configuration and pipeline orchestration
//! - **Audit**: Structured logging of each classification

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod backends;
pub mod classify;
pub mod core;
pub mod engine;

// Re-export commonly used types at the crate root
pub use crate::core::{
    ByteSource, Classification, ContentDigest, ContentHasher, FileDescriptor, LookupClient,
    LookupOutcome, MissReason, RemoteVerdict, ScanDetails, ScanError, ScanResult, ScanSource,
};

pub use crate::engine::{EngineConfig, ScanEngine, ScanEngineBuilder};

/// Prelude module for convenient imports.
///
/// ```rust
/// use scanverdict::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        ByteSource, Classification, ContentDigest, FileDescriptor, LookupClient, LookupOutcome,
        MissReason, RemoteVerdict, ScanDetails, ScanError, ScanResult, ScanSource,
    };
    pub use crate::engine::{EngineConfig, ScanEngine, ScanEngineBuilder};
}
