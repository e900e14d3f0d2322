//! Audit event types and emission functions.

use crate::core::{ContentDigest, FileDescriptor, MissReason, ScanDetails, ScanError, ScanResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base trait for audit events.
pub trait AuditEvent: Serialize {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Returns the timestamp of the event.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Audit event for a finished classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationAuditEvent {
    /// Timestamp of the result.
    pub timestamp: DateTime<Utc>,

    /// Correlation ID for this classification.
    pub scan_id: String,

    /// File name.
    pub file_name: String,

    /// File size in bytes.
    pub file_size_bytes: u64,

    /// Classification.
    pub classification: String,

    /// Which path produced it.
    pub source: String,

    /// Whether classification completed.
    pub success: bool,

    /// Reported engine count, when details are present.
    pub engines: Option<u64>,

    /// Reported detection count, when details are present.
    pub detections: Option<u64>,

    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ClassificationAuditEvent {
    /// Builds the event from a result.
    pub fn from_result(scan_id: &str, result: &ScanResult, duration: Duration) -> Self {
        Self {
            timestamp: result.timestamp,
            scan_id: scan_id.to_string(),
            file_name: result.file_name.clone(),
            file_size_bytes: result.file_size_bytes,
            classification: result.classification.to_string(),
            source: result.source.to_string(),
            success: result.success,
            engines: result.details.as_ref().map(ScanDetails::engines),
            detections: result.details.as_ref().map(ScanDetails::detections),
            duration_ms: duration.as_millis() as u64,
        }
    }
}

impl AuditEvent for ClassificationAuditEvent {
    fn event_type(&self) -> &'static str {
        if self.success {
            "classification_completed"
        } else {
            "classification_failed"
        }
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Emits an audit event for a classification starting.
pub fn emit_classification_started(scan_id: &str, file: &FileDescriptor) {
    tracing::info!(
        target: "scanverdict::audit",
        event_type = "classification_started",
        scan_id = %scan_id,
        file_name = %file.name,
        file_size_bytes = file.size_bytes,
        declared_type = ?file.declared_type,
        "Classification started"
    );
}

/// Emits an audit event for a lookup that produced no verdict.
pub fn emit_lookup_miss(
    scan_id: &str,
    client: &str,
    digest: Option<&ContentDigest>,
    reason: MissReason,
) {
    tracing::info!(
        target: "scanverdict::audit",
        event_type = "lookup_miss",
        scan_id = %scan_id,
        client = %client,
        digest = ?digest.map(ContentDigest::as_str),
        reason = %reason,
        "Lookup produced no verdict"
    );
}

/// Emits an audit event for a finished classification.
pub fn emit_classification_completed(scan_id: &str, result: &ScanResult, duration: Duration) {
    let event = ClassificationAuditEvent::from_result(scan_id, result, duration);

    tracing::info!(
        target: "scanverdict::audit",
        event_type = event.event_type(),
        scan_id = %event.scan_id,
        file_name = %event.file_name,
        file_size_bytes = event.file_size_bytes,
        classification = %event.classification,
        source = %event.source,
        success = event.success,
        engines = ?event.engines,
        detections = ?event.detections,
        duration_ms = event.duration_ms,
        "Classification completed"
    );
}

/// Emits an audit event for a classification that could not complete.
pub fn emit_classification_failed(scan_id: &str, file: &FileDescriptor, error: &ScanError) {
    tracing::error!(
        target: "scanverdict::audit",
        event_type = "classification_failed",
        scan_id = %scan_id,
        file_name = %file.name,
        error = %error,
        "Classification failed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Outcome, ResultSynthesizer};
    use crate::core::Classification;

    #[test]
    fn test_event_from_success() {
        let file = FileDescriptor::new("report.txt", 1024);
        let result = ResultSynthesizer::new().synthesize(
            &file,
            Outcome::Remote(
                Classification::Clean,
                ScanDetails::Remote {
                    engines: 70,
                    detections: 0,
                    malicious: 0,
                    suspicious: 0,
                    clean: 70,
                },
            ),
        );

        let event = ClassificationAuditEvent::from_result("scan-1", &result, Duration::from_millis(42));

        assert_eq!(event.event_type(), "classification_completed");
        assert_eq!(event.classification, "clean");
        assert_eq!(event.source, "remote_lookup");
        assert_eq!(event.engines, Some(70));
        assert_eq!(event.duration_ms, 42);
        assert_eq!(event.timestamp(), result.timestamp);
    }

    #[test]
    fn test_event_from_failure() {
        let file = FileDescriptor::new("report.txt", 1024);
        let result = ResultSynthesizer::new().failure(&file, "boom");

        let event = ClassificationAuditEvent::from_result("scan-2", &result, Duration::ZERO);

        assert_eq!(event.event_type(), "classification_failed");
        assert_eq!(event.classification, "error");
        assert_eq!(event.engines, None);
    }
}
