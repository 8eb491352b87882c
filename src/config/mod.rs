//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → loader.rs (optional TOML file)
//!     → cli.rs (explicit flags win)
//!     → ProbeConfig::resolve (identity settled)
//!     → ResolvedConfig (immutable, cloned into every handler)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved; there is no reload path
//! - All fields have defaults so an empty file or no flags is valid

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{
    parse_duration, DurationError, ProbeConfig, ResolvedConfig, DEFAULT_LIVENESS_DELAY,
    DEFAULT_PORT, MAX_LIVENESS_DELAY,
};
