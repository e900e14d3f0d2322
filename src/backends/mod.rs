//! Lookup client implementations.
//!
//! This module contains implementations of the `LookupClient` trait.
//!
//! ## Available Backends
//!
//! - [`mock`] - An in-memory client for testing
//! - [`virustotal`] - VirusTotal v3 file reports (requires `virustotal` feature)
//!
//! ## Implementing a Custom Backend
//!
//! Any threat-intelligence service keyed by SHA-256 can back the engine:
//!
//! ```rust,ignore
//! use scanverdict::core::{ContentDigest, LookupClient, LookupOutcome, MissReason};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct MyLookup {
//!     // Your client's configuration
//! }
//!
//! #[async_trait]
//! impl LookupClient for MyLookup {
//!     fn name(&self) -> &str {
//!         "my-lookup"
//!     }
//!
//!     async fn lookup(&self, digest: &ContentDigest) -> LookupOutcome {
//!         // Query the service once, map failures to a MissReason
//!         LookupOutcome::Miss(MissReason::NotFound)
//!     }
//! }
//! ```

pub mod mock;

#[cfg(feature = "virustotal")]
pub mod virustotal;

// Re-exports
pub use mock::MockLookup;

#[cfg(feature = "virustotal")]
pub use virustotal::VirusTotalLookup;
