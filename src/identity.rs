//! Instance identity.
//!
//! Every response body and every request log line carries the identity so
//! traffic through a chain of probes can be attributed to the instance that
//! answered it.

use std::fmt;
use std::sync::Arc;

/// Used only if the generator yields nothing.
const FALLBACK_NAME: &str = "nameless-instance";

/// Cheaply cloneable, never-empty instance name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(Arc<str>);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Arc::from(id.into()))
    }

    /// Pick a random two-word name.
    pub fn generate() -> Self {
        Self::new(generate())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two words joined by a dash, e.g. `sincere-walrus`.
pub fn generate() -> String {
    petname::petname(2, "-").unwrap_or_else(|| FALLBACK_NAME.to_string())
}
