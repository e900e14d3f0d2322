//! Classification orchestration.
//!
//! [`ScanEngine`] runs one file through hashing, remote lookup and either
//! verdict parsing or heuristic scoring, and always returns a
//! [`ScanResult`](crate::core::ScanResult).

mod config;
mod scan_engine;

pub use config::{EngineConfig, DEFAULT_LOOKUP_ENDPOINT, PLACEHOLDER_CREDENTIAL};
pub use scan_engine::{ScanEngine, ScanEngineBuilder};
