//! Diagnostic network probe.
//!
//! A small HTTP server for exercising service-to-service networking: it
//! echoes requests, answers health and liveness checks, and calls other
//! services on request, relaying what came back.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags / TOML ──▶ config ──▶ ResolvedConfig (id settled, immutable)
//!                                     │
//!                                     ▼
//!                         http::ListenerSet (one task per port)
//!                ┌────────────────────┼─────────────────────┐
//!                ▼                    ▼                     ▼
//!          serving port          health port          liveness port
//!         /echo   /call           /health                /live
//!                   │           (+ catch-all fallback on every port)
//!                   ▼
//!          reqwest GET ──▶ downstream ──▶ relay back to caller
//! ```

pub mod cli;
pub mod config;
pub mod http;
pub mod identity;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::{ProbeConfig, ResolvedConfig};
pub use http::ListenerSet;
pub use identity::Identity;
pub use lifecycle::Shutdown;
