//! Interpretation of remote verdicts.

use crate::core::{Classification, RemoteVerdict, ScanDetails};

/// Maps per-engine counts from the lookup service into a classification.
///
/// Rules are ordered and the first match wins:
///
/// 1. any malicious detection → `Infected`
/// 2. more than [`SUSPICIOUS_THRESHOLD`](Self::SUSPICIOUS_THRESHOLD) suspicious detections → `Suspicious`
/// 3. otherwise → `Clean`
#[derive(Debug, Clone, Copy, Default)]
pub struct VerdictParser;

impl VerdictParser {
    /// Suspicious detections tolerated before the file is called suspicious.
    pub const SUSPICIOUS_THRESHOLD: u64 = 2;

    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Classifies a verdict and builds its detail block.
    pub fn parse(&self, verdict: &RemoteVerdict) -> (Classification, ScanDetails) {
        let classification = if verdict.malicious > 0 {
            Classification::Infected
        } else if verdict.suspicious > Self::SUSPICIOUS_THRESHOLD {
            Classification::Suspicious
        } else {
            Classification::Clean
        };

        let details = ScanDetails::Remote {
            engines: verdict.engines(),
            detections: verdict.malicious.saturating_add(verdict.suspicious),
            malicious: verdict.malicious,
            suspicious: verdict.suspicious,
            clean: verdict.harmless.saturating_add(verdict.undetected),
        };

        (classification, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspicious_verdict() {
        let (classification, details) = VerdictParser::new().parse(&RemoteVerdict::new(0, 4, 60, 1, 0));

        assert_eq!(classification, Classification::Suspicious);
        assert_eq!(
            details,
            ScanDetails::Remote {
                engines: 65,
                detections: 4,
                malicious: 0,
                suspicious: 4,
                clean: 61,
            }
        );
    }

    #[test]
    fn test_malicious_verdict() {
        let (classification, details) = VerdictParser::new().parse(&RemoteVerdict::new(2, 0, 63, 0, 0));

        assert_eq!(classification, Classification::Infected);
        assert_eq!(details.detections(), 2);
        assert_eq!(details.engines(), 65);
    }

    #[test]
    fn test_any_malicious_is_infected() {
        let parser = VerdictParser::new();
        for (suspicious, harmless, undetected, timeout) in
            [(0, 0, 0, 0), (50, 0, 0, 0), (0, 70, 0, 0), (1, 2, 3, 4), (0, 0, 90, 9)]
        {
            let verdict = RemoteVerdict::new(1, suspicious, harmless, undetected, timeout);
            assert_eq!(parser.parse(&verdict).0, Classification::Infected);
        }
    }

    #[test]
    fn test_suspicious_threshold_is_exclusive() {
        let parser = VerdictParser::new();
        assert_eq!(
            parser.parse(&RemoteVerdict::new(0, 2, 60, 0, 0)).0,
            Classification::Clean
        );
        assert_eq!(
            parser.parse(&RemoteVerdict::new(0, 3, 60, 0, 0)).0,
            Classification::Suspicious
        );
    }

    #[test]
    fn test_engines_conservation() {
        let parser = VerdictParser::new();
        let verdict = RemoteVerdict::new(3, 5, 7, 11, 13);
        let (_, details) = parser.parse(&verdict);
        assert_eq!(details.engines(), 3 + 5 + 7 + 11 + 13);
    }

    #[test]
    fn test_counts_saturate_instead_of_overflowing() {
        let parser = VerdictParser::new();

        let (classification, details) = parser.parse(&RemoteVerdict::new(0, 0, u64::MAX, 1, 0));
        assert_eq!(classification, Classification::Clean);
        assert_eq!(details.engines(), u64::MAX);

        let (classification, details) =
            parser.parse(&RemoteVerdict::new(u64::MAX, u64::MAX, 0, 0, 0));
        assert_eq!(classification, Classification::Infected);
        assert_eq!(details.detections(), u64::MAX);
    }

    #[test]
    fn test_empty_verdict_is_clean() {
        let (classification, details) = VerdictParser::new().parse(&RemoteVerdict::default());
        assert_eq!(classification, Classification::Clean);
        assert_eq!(details.engines(), 0);
    }
}
