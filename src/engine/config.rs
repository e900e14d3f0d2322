//! Engine configuration.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Default lookup endpoint (VirusTotal v3 file reports).
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://www.virustotal.com/api/v3/files";

/// Placeholder shipped in sample environment files.
///
/// The lookup treats it as no credential, while the heuristic seeds from it
/// whenever nothing else is configured.
pub const PLACEHOLDER_CREDENTIAL: &str = "YOUR_VIRUSTOTAL_API_KEY";

/// Read-only configuration handed to the engine by the hosting application.
///
/// The engine never reads process state itself; build this value once and
/// pass it in at construction.
///
/// # Examples
///
/// ```rust
/// use scanverdict::EngineConfig;
/// use std::time::Duration;
///
/// let config = EngineConfig::new()
///     .with_credential("my-api-key")
///     .with_lookup_timeout(Duration::from_secs(10))
///     .with_fallback_enabled(true);
///
/// assert!(config.has_credential());
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL the digest is appended to.
    pub lookup_endpoint: String,

    /// Service credential (kept secret).
    pub credential: Option<SecretString>,

    /// Whether a lookup miss falls back to the heuristic scorer.
    pub fallback_enabled: bool,

    /// Upper bound on a single lookup.
    pub lookup_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookup_endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            credential: None,
            fallback_enabled: true,
            lookup_timeout: Duration::from_secs(30),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with defaults and no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lookup endpoint.
    pub fn with_lookup_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.lookup_endpoint = endpoint.into();
        self
    }

    /// Sets the credential.
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(SecretString::new(credential.into().into()));
        self
    }

    /// Enables or disables the heuristic fallback.
    pub fn with_fallback_enabled(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    /// Sets the lookup timeout.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Returns the credential if one is usable.
    ///
    /// Empty strings and the sample placeholder count as absent.
    pub fn credential(&self) -> Option<&str> {
        self.credential
            .as_ref()
            .map(|c| c.expose_secret())
            .filter(|c| !c.is_empty() && *c != PLACEHOLDER_CREDENTIAL)
    }

    /// Returns the string that seeds the heuristic scorer.
    ///
    /// This is the configured credential as given, or
    /// [`PLACEHOLDER_CREDENTIAL`] when it is missing or empty.
    pub fn heuristic_seed(&self) -> &str {
        self.credential
            .as_ref()
            .map(|c| c.expose_secret())
            .filter(|c| !c.is_empty())
            .unwrap_or(PLACEHOLDER_CREDENTIAL)
    }

    /// Returns `true` if a usable credential is configured.
    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }
}
