//! The classification engine.

use crate::audit;
use crate::classify::{HeuristicScorer, Outcome, ResultSynthesizer, VerdictParser};
use crate::core::{
    ArcLookupClient, ByteSource, ContentDigest, ContentHasher, FileDescriptor, LookupClient,
    LookupOutcome, MissReason, ScanError, ScanResult, Stage,
};
use crate::engine::config::EngineConfig;

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Builder for creating a `ScanEngine`.
pub struct ScanEngineBuilder {
    config: EngineConfig,
    lookup: Option<ArcLookupClient>,
}

impl ScanEngineBuilder {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            lookup: None,
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the lookup client.
    pub fn with_lookup_client<C: LookupClient + 'static>(mut self, client: C) -> Self {
        self.lookup = Some(Arc::new(client));
        self
    }

    /// Sets a lookup client wrapped in an Arc.
    pub fn with_arc_lookup_client(mut self, client: ArcLookupClient) -> Self {
        self.lookup = Some(client);
        self
    }

    /// Builds the engine.
    ///
    /// Without an explicit lookup client, a VirusTotal client is created
    /// from the configuration.
    pub fn build(self) -> Result<ScanEngine, ScanError> {
        if self.config.lookup_endpoint.trim().is_empty() {
            return Err(ScanError::configuration("lookup endpoint must not be empty"));
        }
        if self.config.lookup_timeout.is_zero() {
            return Err(ScanError::configuration("lookup timeout must be greater than zero"));
        }

        let lookup = match self.lookup {
            Some(lookup) => lookup,
            None => default_lookup(&self.config)?,
        };

        Ok(ScanEngine {
            config: self.config,
            lookup,
            hasher: ContentHasher::new(),
            parser: VerdictParser::new(),
            scorer: HeuristicScorer::new(),
            synthesizer: ResultSynthesizer::new(),
        })
    }
}

impl Default for ScanEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "virustotal")]
fn default_lookup(config: &EngineConfig) -> Result<ArcLookupClient, ScanError> {
    Ok(Arc::new(crate::backends::VirusTotalLookup::new(config)?))
}

#[cfg(not(feature = "virustotal"))]
fn default_lookup(_config: &EngineConfig) -> Result<ArcLookupClient, ScanError> {
    Err(ScanError::configuration(
        "no lookup client configured and the 'virustotal' feature is disabled",
    ))
}

/// Stage reached by one pipeline run, readable after a panic.
#[derive(Debug, Default)]
struct StageTracker(AtomicU8);

impl StageTracker {
    fn enter(&self, stage: Stage) {
        self.0.store(stage as u8, Ordering::Relaxed);
        tracing::trace!(stage = %stage, "Entering stage");
    }

    fn current(&self) -> Stage {
        Stage::from_u8(self.0.load(Ordering::Relaxed))
    }
}

/// Classifies files by digest lookup with a heuristic fallback.
///
/// The engine holds only read-only configuration and is safe to share
/// across tasks in an `Arc`.
///
/// # Examples
///
/// ```rust,ignore
/// use scanverdict::prelude::*;
///
/// let engine = ScanEngine::builder()
///     .with_config(EngineConfig::new().with_credential("api-key"))
///     .build()?;
///
/// let file = FileDescriptor::new("report.txt", 11);
/// let result = engine.classify(file, ByteSource::from_bytes(b"hello world".to_vec())).await;
/// println!("{}", result.classification);
/// ```
pub struct ScanEngine {
    /// Configuration.
    config: EngineConfig,
    /// Lookup client.
    lookup: ArcLookupClient,
    /// Content hasher.
    hasher: ContentHasher,
    /// Remote verdict interpretation.
    parser: VerdictParser,
    /// Heuristic fallback.
    scorer: HeuristicScorer,
    /// Result construction.
    synthesizer: ResultSynthesizer,
}

impl ScanEngine {
    /// Creates a new builder.
    pub fn builder() -> ScanEngineBuilder {
        ScanEngineBuilder::new()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the lookup client.
    pub fn lookup_client(&self) -> &ArcLookupClient {
        &self.lookup
    }

    /// Classifies one file.
    ///
    /// Always returns a fully populated result. Unexpected failures,
    /// including panics in any stage, become a result with
    /// `classification = error`.
    pub async fn classify(&self, file: FileDescriptor, source: ByteSource) -> ScanResult {
        let scan_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        let span = tracing::info_span!("classify", scan_id = %scan_id, file_name = %file.name);

        audit::emit_classification_started(&scan_id, &file);

        let stage = StageTracker::default();
        let pipeline = AssertUnwindSafe(self.run(&scan_id, &file, &source, &stage))
            .catch_unwind()
            .instrument(span)
            .await;

        let result = match pipeline {
            Ok(Ok(result)) => result,
            Ok(Err(error)) => self.fail(&scan_id, &file, error),
            Err(payload) => {
                let error = ScanError::Panicked {
                    stage: stage.current(),
                    message: panic_message(payload.as_ref()),
                };
                self.fail(&scan_id, &file, error)
            }
        };

        audit::emit_classification_completed(&scan_id, &result, started.elapsed());
        result
    }

    /// Classifies a file on disk, taking name and size from the filesystem.
    pub async fn classify_path(&self, path: impl AsRef<Path>) -> ScanResult {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match tokio::fs::metadata(path).await {
            Ok(metadata) => {
                self.classify(
                    FileDescriptor::new(name, metadata.len()),
                    ByteSource::from_path(path),
                )
                .await
            }
            Err(e) => {
                let scan_id = uuid::Uuid::new_v4().to_string();
                let file = FileDescriptor::new(name, 0);
                audit::emit_classification_started(&scan_id, &file);
                let result = self.fail(&scan_id, &file, ScanError::from_path_io(path, e));
                audit::emit_classification_completed(&scan_id, &result, std::time::Duration::ZERO);
                result
            }
        }
    }

    async fn run(
        &self,
        scan_id: &str,
        file: &FileDescriptor,
        source: &ByteSource,
        stage: &StageTracker,
    ) -> Result<ScanResult, ScanError> {
        stage.enter(Stage::Hashing);
        let digest = match self.hasher.hash_source(source).await {
            Ok(digest) => Some(digest),
            Err(e) if e.is_hashing_failure() => {
                tracing::warn!(error = %e, "Hashing failed, treating lookup as unreachable");
                None
            }
            Err(e) => return Err(e),
        };

        stage.enter(Stage::Lookup);
        let lookup = match &digest {
            Some(digest) => self.lookup_with_timeout(digest).await,
            None => LookupOutcome::Miss(MissReason::Unreachable),
        };

        let outcome = match lookup {
            LookupOutcome::Hit(verdict) => {
                stage.enter(Stage::Parsing);
                tracing::debug!(
                    engines = verdict.engines(),
                    malicious = verdict.malicious,
                    suspicious = verdict.suspicious,
                    label = %verdict.label,
                    "Lookup hit"
                );
                let (classification, details) = self.parser.parse(&verdict);
                Outcome::Remote(classification, details)
            }
            LookupOutcome::Miss(reason) => {
                audit::emit_lookup_miss(scan_id, self.lookup.name(), digest.as_ref(), reason);
                if self.config.fallback_enabled {
                    stage.enter(Stage::Scoring);
                    let score = self.scorer.score(file, self.config.heuristic_seed());
                    tracing::debug!(
                        risk_factors = ?score.risk_factors,
                        seed = score.seed.value(),
                        classification = %score.classification,
                        "Heuristic score computed"
                    );
                    Outcome::Heuristic(score)
                } else {
                    Outcome::Unavailable(reason)
                }
            }
        };

        stage.enter(Stage::Synthesized);
        Ok(self.synthesizer.synthesize(file, outcome))
    }

    async fn lookup_with_timeout(&self, digest: &ContentDigest) -> LookupOutcome {
        match tokio::time::timeout(self.config.lookup_timeout, self.lookup.lookup(digest)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    client = self.lookup.name(),
                    digest = %digest.short(),
                    timeout_ms = self.config.lookup_timeout.as_millis() as u64,
                    "Lookup timed out"
                );
                LookupOutcome::Miss(MissReason::Unreachable)
            }
        }
    }

    fn fail(&self, scan_id: &str, file: &FileDescriptor, error: ScanError) -> ScanResult {
        audit::emit_classification_failed(scan_id, file, &error);
        self.synthesizer.failure(file, error.to_string())
    }
}

impl std::fmt::Debug for ScanEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanEngine")
            .field("lookup", &self.lookup.name())
            .field("config", &self.config)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}
