//! Result synthesis.

use crate::classify::file_type::resolve_file_type;
use crate::classify::heuristic::HeuristicScore;
use crate::core::{
    Classification, FileDescriptor, MissReason, ScanDetails, ScanResult, ScanSource,
};

use chrono::Utc;

/// What the pipeline produced before synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A remote verdict, already parsed.
    Remote(Classification, ScanDetails),
    /// A heuristic score taken after a lookup miss.
    Heuristic(HeuristicScore),
    /// The lookup missed and the fallback is disabled.
    Unavailable(MissReason),
}

/// Builds the canonical `ScanResult` from either classification path.
///
/// Every result is stamped with the current time and carries the
/// descriptor's name, size and resolved type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultSynthesizer;

impl ResultSynthesizer {
    /// Creates a new synthesizer.
    pub fn new() -> Self {
        Self
    }

    /// Builds the result for a completed classification.
    pub fn synthesize(&self, file: &FileDescriptor, outcome: Outcome) -> ScanResult {
        let (classification, source, details, message) = match outcome {
            Outcome::Remote(classification, details) => {
                (classification, ScanSource::RemoteLookup, Some(details), None)
            }
            Outcome::Heuristic(score) => (
                score.classification,
                ScanSource::Heuristic,
                Some(score.details),
                None,
            ),
            Outcome::Unavailable(reason) => (
                Classification::Unknown,
                ScanSource::RemoteLookup,
                None,
                Some(format!(
                    "no verdict available (lookup {}) and heuristic fallback is disabled",
                    reason
                )),
            ),
        };

        ScanResult {
            success: true,
            classification,
            source,
            file_name: file.name.clone(),
            file_size_bytes: file.size_bytes,
            file_type: resolve_file_type(file),
            timestamp: Utc::now(),
            details,
            message,
        }
    }

    /// Builds the result for a classification that could not complete.
    pub fn failure(&self, file: &FileDescriptor, message: impl Into<String>) -> ScanResult {
        ScanResult {
            success: false,
            classification: Classification::Error,
            source: ScanSource::Error,
            file_name: file.name.clone(),
            file_size_bytes: file.size_bytes,
            file_type: resolve_file_type(file),
            timestamp: Utc::now(),
            details: None,
            message: Some(message.into()),
        }
    }
}
