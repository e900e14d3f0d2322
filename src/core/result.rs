//! Scan result structures.
//!
//! `ScanResult` is the single value a classification returns. Its serialized
//! form is the shape rendered by the presentation layer, so field names are
//! camelCase and the detail block is untagged.

use crate::core::types::{Classification, ScanSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supporting numbers for a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanDetails {
    /// Counts taken from a remote verdict.
    Remote {
        /// Total engines that analysed the file.
        engines: u64,
        /// Malicious plus suspicious detections.
        detections: u64,
        /// Engines reporting malicious.
        malicious: u64,
        /// Engines reporting suspicious.
        suspicious: u64,
        /// Harmless plus undetected.
        clean: u64,
    },
    /// Figures produced by the heuristic scorer.
    Heuristic {
        /// Reported engine count.
        engines: u64,
        /// Reported detection count.
        detections: u64,
        /// Number of risk factors that held.
        #[serde(rename = "riskFactors")]
        risk_factors: u64,
        /// Name of the analysis method.
        method: String,
    },
}

impl ScanDetails {
    /// Returns the engine count.
    pub fn engines(&self) -> u64 {
        match self {
            Self::Remote { engines, .. } | Self::Heuristic { engines, .. } => *engines,
        }
    }

    /// Returns the detection count.
    pub fn detections(&self) -> u64 {
        match self {
            Self::Remote { detections, .. } | Self::Heuristic { detections, .. } => *detections,
        }
    }
}

/// The complete result of one classification.
///
/// Immutable once produced and owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Whether classification completed.
    pub success: bool,

    /// The classification.
    pub classification: Classification,

    /// Which path produced the classification.
    pub source: ScanSource,

    /// File name from the descriptor.
    pub file_name: String,

    /// File size from the descriptor.
    pub file_size_bytes: u64,

    /// Resolved file type.
    pub file_type: String,

    /// When the result was produced.
    #[serde(rename = "timestampISO8601")]
    pub timestamp: DateTime<Utc>,

    /// Supporting numbers, present on classified results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ScanDetails>,

    /// Explanation for error and unknown results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScanResult {
    /// Returns `true` if the file is clean.
    pub fn is_clean(&self) -> bool {
        self.classification.is_clean()
    }

    /// Returns `true` if the file is infected.
    pub fn is_infected(&self) -> bool {
        self.classification.is_infected()
    }

    /// Returns `true` if this is a failure result.
    pub fn is_error(&self) -> bool {
        self.classification.is_error()
    }

    /// Renders the result as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(details: Option<ScanDetails>) -> ScanResult {
        ScanResult {
            success: true,
            classification: Classification::Suspicious,
            source: ScanSource::Heuristic,
            file_name: "setup_free_tool.exe".into(),
            file_size_bytes: 2 * 1024 * 1024,
            file_type: "application/x-msdownload".into(),
            timestamp: Utc::now(),
            details,
            message: None,
        }
    }

    #[test]
    fn test_heuristic_result_json_shape() {
        let result = sample(Some(ScanDetails::Heuristic {
            engines: 68,
            detections: 2,
            risk_factors: 2,
            method: "Pattern Recognition + API Validation".into(),
        }));

        let json = result.to_json();
        assert_eq!(json["success"], true);
        assert_eq!(json["classification"], "suspicious");
        assert_eq!(json["source"], "heuristic");
        assert_eq!(json["fileName"], "setup_free_tool.exe");
        assert_eq!(json["fileSizeBytes"], 2 * 1024 * 1024);
        assert!(json["timestampISO8601"].is_string());
        assert_eq!(json["details"]["riskFactors"], 2);
        assert_eq!(json["details"]["engines"], 68);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_remote_details_json_and_back() {
        let result = sample(Some(ScanDetails::Remote {
            engines: 65,
            detections: 4,
            malicious: 0,
            suspicious: 4,
            clean: 61,
        }));

        let json = serde_json::to_string(&result).unwrap();
        let parsed: ScanResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.details, result.details);
        assert_eq!(parsed.details.as_ref().map(ScanDetails::engines), Some(65));
        assert_eq!(parsed.details.as_ref().map(ScanDetails::detections), Some(4));
    }

    #[test]
    fn test_error_result_omits_details() {
        let mut result = sample(None);
        result.success = false;
        result.classification = Classification::Error;
        result.source = ScanSource::Error;
        result.message = Some("classification failed".into());

        let json = result.to_json();
        assert!(json.get("details").is_none());
        assert_eq!(json["message"], "classification failed");
        assert!(result.is_error());
    }
}
