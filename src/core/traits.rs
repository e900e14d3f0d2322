//! The lookup seam between the engine and a threat-intelligence service.
//!
//! This module defines the `LookupClient` trait that every lookup backend
//! implements, together with the explicit `Hit | Miss` outcome it returns.

use crate::core::error::ScanError;
use crate::core::types::{ContentDigest, RemoteVerdict};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Why a lookup produced no verdict.
///
/// A miss is the expected trigger for the heuristic fallback, never an
/// engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// The service has no record of the digest.
    NotFound,
    /// The service could not be reached, timed out, or returned a server error.
    Unreachable,
    /// No usable credential, or the service rejected it.
    Unauthorized,
    /// The service answered with something other than a verdict.
    MalformedResponse,
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Unreachable => write!(f, "unreachable"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::MalformedResponse => write!(f, "malformed_response"),
        }
    }
}

/// Result of a single lookup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The service returned a verdict for the digest.
    Hit(RemoteVerdict),
    /// No verdict is available.
    Miss(MissReason),
}

impl LookupOutcome {
    /// Returns `true` for a hit.
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// Returns the miss reason, if this is a miss.
    pub fn miss_reason(&self) -> Option<MissReason> {
        match self {
            Self::Miss(reason) => Some(*reason),
            Self::Hit(_) => None,
        }
    }
}

/// A content-addressed threat-intelligence lookup.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync`; the engine shares one client
///   across concurrent classifications.
/// - `lookup` makes at most one attempt and never retries.
/// - Every failure mode maps to a [`MissReason`]; `lookup` has no error path.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use scanverdict::core::{ContentDigest, LookupClient, LookupOutcome, MissReason};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct OfflineLookup;
///
/// #[async_trait]
/// impl LookupClient for OfflineLookup {
///     fn name(&self) -> &str {
///         "offline"
///     }
///
///     async fn lookup(&self, _digest: &ContentDigest) -> LookupOutcome {
///         LookupOutcome::Miss(MissReason::Unreachable)
///     }
/// }
/// ```
#[async_trait]
pub trait LookupClient: Send + Sync + Debug {
    /// Returns a stable identifier for this client, such as "virustotal".
    fn name(&self) -> &str;

    /// Looks up a digest.
    async fn lookup(&self, digest: &ContentDigest) -> LookupOutcome;

    /// Checks that the service is reachable and accepts the credential.
    async fn health_check(&self) -> Result<(), ScanError> {
        Ok(())
    }
}

/// An arc-wrapped lookup client for shared ownership.
pub type ArcLookupClient = std::sync::Arc<dyn LookupClient>;
