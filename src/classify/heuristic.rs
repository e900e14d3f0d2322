//! Deterministic heuristic fallback.
//!
//! This is an explicit rule table over a file's name and size, combined with
//! a seed derived from the configured credential. It performs no content
//! analysis and makes no claim of detecting real malware; its job is to give
//! a reproducible classification when no remote verdict is available.

use crate::core::{Classification, FileDescriptor, ScanDetails};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name reported in heuristic detail blocks.
pub const HEURISTIC_METHOD: &str = "Pattern Recognition + API Validation";

/// Files above this size count as a risk factor.
pub const LARGE_FILE_THRESHOLD: u64 = 50 * 1024 * 1024;

const RISKY_EXTENSIONS: [&str; 6] = [".exe", ".bat", ".scr", ".vbs", ".com", ".pif"];

/// One boolean check against a file's name or size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// Name mentions "virus" or "malware".
    MalwareKeyword,
    /// Name mentions "crack" or "keygen".
    CrackKeyword,
    /// Name mentions "hack" or "exploit".
    HackKeyword,
    /// Name ends with an executable or script extension.
    ExecutableExtension,
    /// File is larger than [`LARGE_FILE_THRESHOLD`].
    LargeFile,
    /// Name mentions both "setup" and "free".
    FreeSetup,
}

impl RiskFactor {
    /// Every factor, in evaluation order.
    pub const ALL: [RiskFactor; 6] = [
        Self::MalwareKeyword,
        Self::CrackKeyword,
        Self::HackKeyword,
        Self::ExecutableExtension,
        Self::LargeFile,
        Self::FreeSetup,
    ];

    /// Evaluates the factor. `name` must already be lowercased.
    pub fn matches(&self, name: &str, size_bytes: u64) -> bool {
        match self {
            Self::MalwareKeyword => name.contains("virus") || name.contains("malware"),
            Self::CrackKeyword => name.contains("crack") || name.contains("keygen"),
            Self::HackKeyword => name.contains("hack") || name.contains("exploit"),
            Self::ExecutableExtension => RISKY_EXTENSIONS.iter().any(|ext| name.ends_with(ext)),
            Self::LargeFile => size_bytes > LARGE_FILE_THRESHOLD,
            Self::FreeSetup => name.contains("setup") && name.contains("free"),
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalwareKeyword => write!(f, "malware_keyword"),
            Self::CrackKeyword => write!(f, "crack_keyword"),
            Self::HackKeyword => write!(f, "hack_keyword"),
            Self::ExecutableExtension => write!(f, "executable_extension"),
            Self::LargeFile => write!(f, "large_file"),
            Self::FreeSetup => write!(f, "free_setup"),
        }
    }
}

/// Seed in `[0, 1)` derived from a credential string.
///
/// The seed is the sum of the credential's UTF-16 code units modulo 100,
/// divided by 100. It is stored as that integer percentage so threshold
/// comparisons and floors are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CredentialSeed(u8);

impl CredentialSeed {
    /// Derives the seed from a credential. The empty string yields zero.
    pub fn from_credential(credential: &str) -> Self {
        let sum: u64 = credential.encode_utf16().map(u64::from).sum();
        Self((sum % 100) as u8)
    }

    /// Returns the seed as a whole percentage (0-99).
    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Returns the seed as a fraction in `[0, 1)`.
    pub fn value(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// `floor(seed * factor)`.
    fn scaled(&self, factor: u64) -> u64 {
        u64::from(self.0) * factor / 100
    }
}

/// Output of the heuristic scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicScore {
    /// The classification.
    pub classification: Classification,
    /// Risk factors that held, in evaluation order.
    pub risk_factors: Vec<RiskFactor>,
    /// The seed used.
    pub seed: CredentialSeed,
    /// Detail block for the result.
    pub details: ScanDetails,
}

/// Local rule-based classifier used when the lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    /// Base engine count reported by the heuristic.
    pub const BASE_ENGINES: u64 = 65;

    /// Creates a new scorer.
    pub fn new() -> Self {
        Self
    }

    /// Returns the risk factors that hold for `file`.
    pub fn risk_factors(&self, file: &FileDescriptor) -> Vec<RiskFactor> {
        let name = file.lowercase_name();
        RiskFactor::ALL
            .into_iter()
            .filter(|factor| factor.matches(&name, file.size_bytes))
            .collect()
    }

    /// Scores a file. Identical inputs always give identical output.
    pub fn score(&self, file: &FileDescriptor, credential: &str) -> HeuristicScore {
        let risk_factors = self.risk_factors(file);
        let seed = CredentialSeed::from_credential(credential);
        let classification = classify(risk_factors.len(), seed);

        let detections = match classification {
            Classification::Infected => seed.scaled(15) + 5,
            Classification::Suspicious => seed.scaled(5) + 1,
            _ => 0,
        };

        let details = ScanDetails::Heuristic {
            engines: Self::BASE_ENGINES + seed.scaled(10),
            detections,
            risk_factors: risk_factors.len() as u64,
            method: HEURISTIC_METHOD.to_string(),
        };

        HeuristicScore {
            classification,
            risk_factors,
            seed,
            details,
        }
    }
}

fn classify(risk: usize, seed: CredentialSeed) -> Classification {
    let pct = seed.percent();
    if risk >= 3 || (risk >= 2 && pct > 70) {
        Classification::Infected
    } else if risk >= 2 || (risk >= 1 && pct > 80) {
        Classification::Suspicious
    } else {
        Classification::Clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_seed_from_credential() {
        // 'A'..'E' = 65..69, sum 335
        assert_eq!(CredentialSeed::from_credential("ABCDE").percent(), 35);
        assert_eq!(CredentialSeed::from_credential("").percent(), 0);
        assert_eq!(CredentialSeed::from_credential("c").percent(), 99);
        assert!((CredentialSeed::from_credential("G").value() - 0.71).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seed_uses_utf16_code_units() {
        // U+1F600 encodes as 0xD83D 0xDE00, sum 112189
        assert_eq!(CredentialSeed::from_credential("\u{1F600}").percent(), 89);
        assert_eq!(CredentialSeed::from_credential("é").percent(), 33);
    }

    #[test]
    fn test_plain_text_file_is_clean() {
        let score = HeuristicScorer::new().score(&FileDescriptor::new("report.txt", 1024), "");

        assert_eq!(score.classification, Classification::Clean);
        assert!(score.risk_factors.is_empty());
        assert_eq!(score.details.detections(), 0);
        assert_eq!(score.details.engines(), 65);
    }

    #[test]
    fn test_free_setup_executable_with_low_seed() {
        let file = FileDescriptor::new("setup_free_tool.exe", 2 * MIB);
        let score = HeuristicScorer::new().score(&file, "ABCDE");

        assert_eq!(
            score.risk_factors,
            vec![RiskFactor::ExecutableExtension, RiskFactor::FreeSetup]
        );
        assert_eq!(score.classification, Classification::Suspicious);
        assert_eq!(
            score.details,
            ScanDetails::Heuristic {
                engines: 68,
                detections: 2,
                risk_factors: 2,
                method: HEURISTIC_METHOD.to_string(),
            }
        );
    }

    #[test]
    fn test_free_setup_executable_with_high_seed() {
        let file = FileDescriptor::new("setup_free_tool.exe", 2 * MIB);
        let score = HeuristicScorer::new().score(&file, "G");

        assert_eq!(score.classification, Classification::Infected);
        assert_eq!(score.details.engines(), 72);
        assert_eq!(score.details.detections(), 15);
    }

    #[test]
    fn test_seed_boundary_is_exclusive() {
        // "F" = 70: two factors at exactly 0.7 stay suspicious
        let file = FileDescriptor::new("keygen.exe", 10);
        let score = HeuristicScorer::new().score(&file, "F");
        assert_eq!(score.seed.percent(), 70);
        assert_eq!(score.classification, Classification::Suspicious);
    }

    #[test]
    fn test_single_factor_needs_high_seed() {
        let file = FileDescriptor::new("installer.exe", 10);
        let scorer = HeuristicScorer::new();

        assert_eq!(scorer.score(&file, "P").classification, Classification::Clean); // 80
        let score = scorer.score(&file, "Q"); // 81
        assert_eq!(score.classification, Classification::Suspicious);
        assert_eq!(score.details.detections(), 5);
    }

    #[test]
    fn test_three_factors_always_infected() {
        let file = FileDescriptor::new("crack_virus.exe", 10);
        let scorer = HeuristicScorer::new();
        for credential in ["", "ABCDE", "c", "G", "Q"] {
            let score = scorer.score(&file, credential);
            assert_eq!(score.risk_factors.len(), 3);
            assert_eq!(score.classification, Classification::Infected);
            let detections = score.details.detections();
            assert!((5..=19).contains(&detections));
        }
    }

    #[test]
    fn test_no_factors_always_clean() {
        let file = FileDescriptor::new("holiday-photo.jpg", 4 * MIB);
        let scorer = HeuristicScorer::new();
        for credential in ["", "ABCDE", "c", "G", "Q"] {
            let score = scorer.score(&file, credential);
            assert_eq!(score.classification, Classification::Clean);
            assert_eq!(score.details.detections(), 0);
            assert!((65..=74).contains(&score.details.engines()));
        }
    }

    #[test]
    fn test_every_factor_detected() {
        let file = FileDescriptor::new("FREE_Setup_Virus_Keygen_Exploit.SCR", LARGE_FILE_THRESHOLD + 1);
        let factors = HeuristicScorer::new().risk_factors(&file);
        assert_eq!(factors, RiskFactor::ALL.to_vec());
    }

    #[test]
    fn test_large_file_threshold_is_exclusive() {
        assert!(!RiskFactor::LargeFile.matches("a.bin", LARGE_FILE_THRESHOLD));
        assert!(RiskFactor::LargeFile.matches("a.bin", LARGE_FILE_THRESHOLD + 1));
    }

    #[test]
    fn test_extension_must_be_suffix() {
        assert!(!RiskFactor::ExecutableExtension.matches("telecom", 0));
        assert!(!RiskFactor::ExecutableExtension.matches("program.exe.txt", 0));
        assert!(RiskFactor::ExecutableExtension.matches("readme.com", 0));
    }

    #[test]
    fn test_score_is_deterministic() {
        let scorer = HeuristicScorer::new();
        let file = FileDescriptor::new("hack_tool.bat", 123);
        assert_eq!(scorer.score(&file, "key-123"), scorer.score(&file, "key-123"));
    }
}
