//! Mock lookup client for testing.
//!
//! This module provides a configurable `LookupClient` that answers from an
//! in-memory table instead of a remote service.

use crate::core::{ContentDigest, LookupClient, LookupOutcome, MissReason, RemoteVerdict, ScanError};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// A mock lookup client.
///
/// Verdicts are keyed by digest hex; unknown digests miss with the
/// configured default reason.
///
/// # Examples
///
/// ```rust
/// use scanverdict::backends::MockLookup;
/// use scanverdict::core::{ContentHasher, MissReason, RemoteVerdict};
/// use std::time::Duration;
///
/// let digest = ContentHasher::new().hash_bytes(b"known sample");
///
/// let client = MockLookup::new()
///     .with_verdict(digest.as_str(), RemoteVerdict::new(2, 0, 63, 0, 0))
///     .with_default_miss(MissReason::NotFound)
///     .with_latency(Duration::from_millis(5));
/// ```
#[derive(Debug)]
pub struct MockLookup {
    /// Name of this client instance.
    name: String,
    /// Verdicts keyed by digest hex.
    verdicts: RwLock<HashMap<String, RemoteVerdict>>,
    /// Miss reason for unknown digests.
    default_miss: MissReason,
    /// Simulated latency for lookups.
    latency: Option<Duration>,
    /// Panic inside `lookup` instead of answering.
    panic_on_lookup: AtomicBool,
    /// Counter for lookup operations.
    lookup_count: AtomicU64,
}

impl MockLookup {
    /// Creates a mock that misses every lookup with `NotFound`.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            verdicts: RwLock::new(HashMap::new()),
            default_miss: MissReason::NotFound,
            latency: None,
            panic_on_lookup: AtomicBool::new(false),
            lookup_count: AtomicU64::new(0),
        }
    }

    /// Creates a mock that misses every lookup with `reason`.
    pub fn always_miss(reason: MissReason) -> Self {
        Self::new().with_default_miss(reason)
    }

    /// Sets the name of this client.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the miss reason for unknown digests.
    pub fn with_default_miss(mut self, reason: MissReason) -> Self {
        self.default_miss = reason;
        self
    }

    /// Adds a verdict for a digest.
    pub fn with_verdict(self, digest: impl Into<String>, verdict: RemoteVerdict) -> Self {
        self.add_verdict(digest, verdict);
        self
    }

    /// Sets the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes every lookup panic.
    pub fn with_panic(self) -> Self {
        self.panic_on_lookup.store(true, Ordering::Relaxed);
        self
    }

    /// Adds a verdict for a digest (shared-reference version).
    pub fn add_verdict(&self, digest: impl Into<String>, verdict: RemoteVerdict) {
        if let Ok(mut verdicts) = self.verdicts.write() {
            verdicts.insert(digest.into(), verdict);
        }
    }

    /// Returns the number of lookups performed.
    pub fn lookup_count(&self) -> u64 {
        self.lookup_count.load(Ordering::Relaxed)
    }
}

impl Default for MockLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LookupClient for MockLookup {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, digest: &ContentDigest) -> LookupOutcome {
        self.lookup_count.fetch_add(1, Ordering::Relaxed);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.panic_on_lookup.load(Ordering::Relaxed) {
            panic!("mock lookup panicked for {}", digest.short());
        }

        let verdict = self
            .verdicts
            .read()
            .ok()
            .and_then(|verdicts| verdicts.get(digest.as_str()).cloned());

        match verdict {
            Some(verdict) => LookupOutcome::Hit(verdict),
            None => LookupOutcome::Miss(self.default_miss),
        }
    }

    async fn health_check(&self) -> Result<(), ScanError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ContentHasher;

    #[tokio::test]
    async fn test_mock_hit_and_miss() {
        let hasher = ContentHasher::new();
        let known = hasher.hash_bytes(b"known");
        let unknown = hasher.hash_bytes(b"unknown");

        let client = MockLookup::new().with_verdict(known.as_str(), RemoteVerdict::new(1, 0, 0, 0, 0));

        assert!(client.lookup(&known).await.is_hit());
        assert_eq!(
            client.lookup(&unknown).await,
            LookupOutcome::Miss(MissReason::NotFound)
        );
        assert_eq!(client.lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_default_miss() {
        let client = MockLookup::always_miss(MissReason::MalformedResponse).with_name("broken");
        let digest = ContentHasher::new().hash_bytes(b"x");

        assert_eq!(client.name(), "broken");
        assert_eq!(
            client.lookup(&digest).await.miss_reason(),
            Some(MissReason::MalformedResponse)
        );
        assert!(client.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_add_verdict_after_construction() {
        let client = MockLookup::new();
        let digest = ContentHasher::new().hash_bytes(b"late");
        client.add_verdict(digest.as_str(), RemoteVerdict::new(0, 0, 70, 0, 0));

        assert!(client.lookup(&digest).await.is_hit());
    }
}
