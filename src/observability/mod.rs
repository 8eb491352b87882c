//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup       → probe{id} span        → logging.rs subscriber → stdout
//! each request  → request{probe, port}  → handler events        → stdout
//! ```
//!
//! # Design Decisions
//! - Identity travels as a span field, never as global logger state
//! - Pretty format for terminals, JSON for log shippers

pub mod logging;

pub use logging::{init_logging, request_span, LogFormat};
