//! Configuration schema definitions.
//!
//! `ProbeConfig` is what the operator supplies (file and flags), with every
//! field defaulted. `ResolvedConfig` is what the listeners and handlers see:
//! the identity has been settled and nothing changes after startup.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::identity::Identity;
use crate::observability::logging::LogFormat;

/// Port used by every role unless told otherwise.
pub const DEFAULT_PORT: u16 = 9000;

/// Grace period before `/live` starts answering 200.
pub const DEFAULT_LIVENESS_DELAY: Duration = Duration::from_secs(1);

/// Longest accepted delay: `i64::MAX` nanoseconds, about 292 years.
pub const MAX_LIVENESS_DELAY: Duration = Duration::from_nanos(i64::MAX as u64);

/// Error type for duration settings.
#[derive(Debug, thiserror::Error)]
pub enum DurationError {
    #[error(transparent)]
    Parse(#[from] humantime::DurationError),
    #[error("duration {0:?} exceeds the maximum of {MAX_LIVENESS_DELAY:?}")]
    TooLong(Duration),
}

/// Parse a human duration (`1s`, `250ms`, `2m`) no longer than [`MAX_LIVENESS_DELAY`].
pub fn parse_duration(raw: &str) -> Result<Duration, DurationError> {
    let delay = humantime::parse_duration(raw)?;
    if delay > MAX_LIVENESS_DELAY {
        return Err(DurationError::TooLong(delay));
    }
    Ok(delay)
}

/// Root configuration for the probe.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Port serving `/echo` and `/call`.
    pub serving_port: u16,

    /// Port serving `/health`.
    pub health_port: u16,

    /// Port serving `/live`.
    pub liveness_port: u16,

    /// When false, `/health` reports 503.
    pub healthy: bool,

    /// Delay before `/live` reports live (e.g. "1s", "250ms").
    #[serde(deserialize_with = "deserialize_duration")]
    pub liveness_delay: Duration,

    /// Instance name returned in every response. Generated when absent.
    pub id: Option<String>,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            serving_port: DEFAULT_PORT,
            health_port: DEFAULT_PORT,
            liveness_port: DEFAULT_PORT,
            healthy: true,
            liveness_delay: DEFAULT_LIVENESS_DELAY,
            id: None,
            log_format: LogFormat::default(),
        }
    }
}

impl ProbeConfig {
    /// Settle the instance identity and freeze the configuration.
    ///
    /// A missing or blank `id` is replaced by a generated two-word name.
    pub fn resolve(self) -> ResolvedConfig {
        let supplied = self.id.filter(|id| !id.trim().is_empty());
        let id = match supplied {
            Some(id) => Identity::new(id),
            None => {
                let id = Identity::generate();
                tracing::info!(id = %id, "No ID provided at startup, picking a random one");
                id
            }
        };

        ResolvedConfig {
            serving_port: self.serving_port,
            health_port: self.health_port,
            liveness_port: self.liveness_port,
            healthy: self.healthy,
            liveness_delay: self.liveness_delay,
            id,
        }
    }
}

/// Immutable configuration shared by all listeners for the process lifetime.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub serving_port: u16,
    pub health_port: u16,
    pub liveness_port: u16,
    pub healthy: bool,
    pub liveness_delay: Duration,
    /// Never empty.
    pub id: Identity,
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_duration(&raw).map_err(serde::de::Error::custom)
}
