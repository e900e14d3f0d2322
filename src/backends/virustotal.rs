//! VirusTotal lookup backend.
//!
//! This module provides a `LookupClient` that asks the VirusTotal v3 API
//! for an existing file report by SHA-256.
//!
//! # Requirements
//!
//! - VirusTotal API key
//! - Network access to the configured endpoint
//!
//! # Protocol
//!
//! `GET {endpoint}/{sha256}` with an `x-apikey` header. A 2xx response
//! carries `data.attributes.last_analysis_stats`; everything else is a miss.
//! Unknown files are never uploaded.

use crate::core::{ContentDigest, LookupClient, LookupOutcome, MissReason, RemoteVerdict, ScanError};
use crate::engine::EngineConfig;

use async_trait::async_trait;
use chrono::DateTime;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// SHA-256 of the EICAR test file, which every VirusTotal account can see.
const EICAR_SHA256: &str = "275a021bbfb6489e54d471899f7db9d1663fc695ec2fe2a2c4538aabf651fd0f";

#[derive(Debug, Deserialize)]
struct FileReport {
    data: FileObject,
}

#[derive(Debug, Deserialize)]
struct FileObject {
    attributes: FileAttributes,
}

#[derive(Debug, Deserialize)]
struct FileAttributes {
    last_analysis_stats: AnalysisStats,
    #[serde(default)]
    last_analysis_date: Option<i64>,
    #[serde(default)]
    meaningful_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalysisStats {
    #[serde(default)]
    malicious: u64,
    #[serde(default)]
    suspicious: u64,
    #[serde(default)]
    harmless: u64,
    #[serde(default)]
    undetected: u64,
    #[serde(default)]
    timeout: u64,
}

/// Parses a file report body into a verdict.
///
/// Returns `None` when the body is not JSON or lacks analysis stats.
pub fn parse_file_report(body: &[u8]) -> Option<RemoteVerdict> {
    let report: FileReport = serde_json::from_slice(body).ok()?;
    let attributes = report.data.attributes;
    let stats = attributes.last_analysis_stats;

    let mut verdict = RemoteVerdict::new(
        stats.malicious,
        stats.suspicious,
        stats.harmless,
        stats.undetected,
        stats.timeout,
    );
    if let Some(label) = attributes.meaningful_name {
        verdict = verdict.with_label(label);
    }
    if let Some(observed_at) = attributes
        .last_analysis_date
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
    {
        verdict = verdict.with_observed_at(observed_at);
    }
    Some(verdict)
}

/// Maps a non-success HTTP status to a miss reason.
pub fn miss_for_status(status: reqwest::StatusCode) -> MissReason {
    match status {
        reqwest::StatusCode::NOT_FOUND => MissReason::NotFound,
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => MissReason::Unauthorized,
        _ => MissReason::Unreachable,
    }
}

/// VirusTotal lookup client.
///
/// # Example
///
/// ```rust,ignore
/// use scanverdict::backends::VirusTotalLookup;
/// use scanverdict::EngineConfig;
///
/// let config = EngineConfig::new().with_credential("your-api-key");
/// let client = VirusTotalLookup::new(&config)?;
/// ```
#[derive(Debug)]
pub struct VirusTotalLookup {
    endpoint: String,
    credential: Option<SecretString>,
    timeout: Duration,
    client: reqwest::Client,
}

impl VirusTotalLookup {
    /// Creates a client from the engine configuration.
    pub fn new(config: &EngineConfig) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .timeout(config.lookup_timeout)
            .build()
            .map_err(|e| ScanError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.lookup_endpoint.trim_end_matches('/').to_string(),
            credential: config
                .credential()
                .map(|c| SecretString::new(c.to_string().into())),
            timeout: config.lookup_timeout,
            client,
        })
    }

    /// Returns `true` if a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    fn report_url(&self, digest: &str) -> String {
        format!("{}/{}", self.endpoint, digest)
    }

    async fn fetch(&self, credential: &SecretString, digest: &str) -> LookupOutcome {
        let response = match self
            .client
            .get(self.report_url(digest))
            .header("x-apikey", credential.expose_secret())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    engine = "virustotal",
                    timed_out = e.is_timeout(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    error = %e,
                    "Lookup request failed"
                );
                return LookupOutcome::Miss(MissReason::Unreachable);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let reason = miss_for_status(status);
            tracing::debug!(
                engine = "virustotal",
                status = status.as_u16(),
                reason = %reason,
                "Lookup returned no report"
            );
            return LookupOutcome::Miss(reason);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(engine = "virustotal", error = %e, "Failed to read lookup response");
                return LookupOutcome::Miss(MissReason::Unreachable);
            }
        };

        match parse_file_report(&body) {
            Some(verdict) => LookupOutcome::Hit(verdict),
            None => {
                tracing::warn!(
                    engine = "virustotal",
                    body_len = body.len(),
                    "Lookup response missing analysis stats"
                );
                LookupOutcome::Miss(MissReason::MalformedResponse)
            }
        }
    }
}

#[async_trait]
impl LookupClient for VirusTotalLookup {
    fn name(&self) -> &str {
        "virustotal"
    }

    async fn lookup(&self, digest: &ContentDigest) -> LookupOutcome {
        let Some(credential) = &self.credential else {
            return LookupOutcome::Miss(MissReason::Unauthorized);
        };
        self.fetch(credential, digest.as_str()).await
    }

    async fn health_check(&self) -> Result<(), ScanError> {
        let Some(credential) = &self.credential else {
            return Err(ScanError::configuration("VirusTotal credential is not configured"));
        };

        match self.fetch(credential, EICAR_SHA256).await {
            LookupOutcome::Hit(_) => Ok(()),
            LookupOutcome::Miss(reason) => Err(ScanError::internal(format!(
                "EICAR lookup failed: {}",
                reason
            ))),
        }
    }
}
