//! Classification stages.
//!
//! - [`verdict`] - turns remote verdict counts into a classification
//! - [`heuristic`] - the deterministic local fallback
//! - [`file_type`] - resolves the file type shown in results
//! - [`synthesizer`] - builds the final `ScanResult`

pub mod file_type;
pub mod heuristic;
pub mod synthesizer;
pub mod verdict;

pub use file_type::resolve_file_type;
pub use heuristic::{CredentialSeed, HeuristicScore, HeuristicScorer, RiskFactor};
pub use synthesizer::{Outcome, ResultSynthesizer};
pub use verdict::VerdictParser;
