//! Structured audit logging.
//!
//! This module provides functions for emitting structured audit events
//! using the `tracing` crate on the `scanverdict::audit` target. Events can
//! be captured by any tracing subscriber (JSON file, OpenTelemetry, etc.).
//! Credentials are never part of an event.

mod events;

pub use events::{
    emit_classification_completed, emit_classification_failed, emit_classification_started,
    emit_lookup_miss, AuditEvent, ClassificationAuditEvent,
};
