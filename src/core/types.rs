//! Core types used throughout the scanverdict library.
//!
//! This module defines the data model shared by every stage of a
//! classification: the caller's file description, the content digest,
//! the remote verdict counts, and the classification itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Description of the file being classified.
///
/// Provided by the caller for the duration of one `classify` call.
///
/// # Examples
///
/// ```rust
/// use scanverdict::core::FileDescriptor;
///
/// let file = FileDescriptor::new("report.txt", 1024).with_declared_type("text/plain");
/// assert_eq!(file.extension(), Some(".txt".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Original file name as supplied by the uploader.
    pub name: String,

    /// File size in bytes.
    pub size_bytes: u64,

    /// MIME type declared by the uploader, if any.
    pub declared_type: Option<String>,
}

impl FileDescriptor {
    /// Creates a descriptor with no declared type.
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            declared_type: None,
        }
    }

    /// Sets the declared MIME type.
    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    /// Returns the file name in lowercase.
    pub fn lowercase_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Returns the lowercased extension including the leading dot.
    pub fn extension(&self) -> Option<String> {
        let name = self.lowercase_name();
        name.rfind('.').map(|idx| name[idx..].to_string())
    }

    /// Returns the declared type when it is present and non-empty.
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref().filter(|t| !t.is_empty())
    }
}

/// SHA-256 digest of a file's content, as lowercase hex.
///
/// Used only as a lookup key; the engine never persists it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Length of a hex-encoded SHA-256 digest.
    pub const HEX_LEN: usize = 64;

    pub(crate) fn from_hex(hex: String) -> Self {
        Self(hex)
    }

    /// Returns the digest as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first eight hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(8)]
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

/// Per-engine counts reported by the threat-intelligence service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteVerdict {
    /// Engines that flagged the file as malicious.
    pub malicious: u64,
    /// Engines that flagged the file as suspicious.
    pub suspicious: u64,
    /// Engines that reported the file as harmless.
    pub harmless: u64,
    /// Engines that did not detect anything.
    pub undetected: u64,
    /// Engines that timed out.
    pub timeout: u64,
    /// Name the service associates with the content.
    pub label: String,
    /// When the service last analysed the content.
    pub observed_at: Option<DateTime<Utc>>,
}

impl RemoteVerdict {
    /// Creates a verdict from the five analysis counts.
    pub fn new(malicious: u64, suspicious: u64, harmless: u64, undetected: u64, timeout: u64) -> Self {
        Self {
            malicious,
            suspicious,
            harmless,
            undetected,
            timeout,
            ..Self::default()
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the observation time.
    pub fn with_observed_at(mut self, observed_at: DateTime<Utc>) -> Self {
        self.observed_at = Some(observed_at);
        self
    }

    /// Total number of engines that took part in the analysis, saturating at `u64::MAX`.
    pub fn engines(&self) -> u64 {
        self.malicious
            .saturating_add(self.suspicious)
            .saturating_add(self.harmless)
            .saturating_add(self.undetected)
            .saturating_add(self.timeout)
    }
}

/// The outcome of classifying a file.
///
/// `Unknown` and `Error` are terminal states rather than severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// No threats indicated.
    Clean,
    /// Potentially harmful.
    Suspicious,
    /// Threats indicated.
    Infected,
    /// No verdict available and heuristic fallback disabled.
    Unknown,
    /// Classification could not be completed.
    Error,
}

impl Classification {
    /// Returns the lowercase name used in serialized results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Suspicious => "suspicious",
            Self::Infected => "infected",
            Self::Unknown => "unknown",
            Self::Error => "error",
        }
    }

    /// Returns `true` for a clean classification.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Returns `true` for an infected classification.
    pub fn is_infected(&self) -> bool {
        matches!(self, Self::Infected)
    }

    /// Returns `true` for an error classification.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanSource {
    /// Verdict from the threat-intelligence lookup.
    RemoteLookup,
    /// Local heuristic scorer.
    Heuristic,
    /// Failure result.
    Error,
}

impl fmt::Display for ScanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteLookup => write!(f, "remote_lookup"),
            Self::Heuristic => write!(f, "heuristic"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Pipeline stage within one classification.
///
/// `Start -> Hashing -> Lookup -> Parsing | Scoring -> Synthesized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Stage {
    /// Nothing has run yet.
    Start = 0,
    /// Computing the content digest.
    Hashing = 1,
    /// Querying the lookup client.
    Lookup = 2,
    /// Interpreting a remote verdict.
    Parsing = 3,
    /// Running the heuristic scorer.
    Scoring = 4,
    /// Building the final result.
    Synthesized = 5,
}

impl Stage {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Hashing,
            2 => Self::Lookup,
            3 => Self::Parsing,
            4 => Self::Scoring,
            5 => Self::Synthesized,
            _ => Self::Start,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Hashing => write!(f, "hashing"),
            Self::Lookup => write!(f, "lookup"),
            Self::Parsing => write!(f, "parsing"),
            Self::Scoring => write!(f, "scoring"),
            Self::Synthesized => write!(f, "synthesis"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_extension() {
        assert_eq!(
            FileDescriptor::new("Setup.EXE", 1).extension(),
            Some(".exe".to_string())
        );
        assert_eq!(
            FileDescriptor::new("archive.tar.gz", 1).extension(),
            Some(".gz".to_string())
        );
        assert_eq!(FileDescriptor::new("Makefile", 1).extension(), None);
    }

    #[test]
    fn test_declared_type_ignores_empty() {
        let file = FileDescriptor::new("a.bin", 1).with_declared_type("");
        assert_eq!(file.declared_type(), None);

        let file = FileDescriptor::new("a.bin", 1).with_declared_type("application/octet-stream");
        assert_eq!(file.declared_type(), Some("application/octet-stream"));
    }

    #[test]
    fn test_remote_verdict_engines() {
        let verdict = RemoteVerdict::new(1, 2, 3, 4, 5);
        assert_eq!(verdict.engines(), 15);
    }

    #[test]
    fn test_classification_serialization() {
        let json = serde_json::to_string(&Classification::Suspicious).unwrap();
        assert_eq!(json, "\"suspicious\"");
        let json = serde_json::to_string(&ScanSource::RemoteLookup).unwrap();
        assert_eq!(json, "\"remote_lookup\"");
    }

    #[test]
    fn test_stage_round_trip_through_u8() {
        for stage in [
            Stage::Start,
            Stage::Hashing,
            Stage::Lookup,
            Stage::Parsing,
            Stage::Scoring,
            Stage::Synthesized,
        ] {
            assert_eq!(Stage::from_u8(stage as u8), stage);
        }
    }

    #[test]
    fn test_digest_short() {
        let digest = ContentDigest::from_hex("0123456789abcdef".repeat(4));
        assert_eq!(digest.short(), "01234567");
        assert_eq!(digest.as_str().len(), ContentDigest::HEX_LEN);
    }
}
