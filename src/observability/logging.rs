//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber (env filter + fmt layer)
//! - Build the per-request span that stamps the instance id on handler logs

use axum::http::Request;
use serde::Deserialize;
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::identity::Identity;

const DEFAULT_FILTER: &str = "mesh_probe=info,tower_http=info";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event, span fields included.
    Json,
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init(),
    }
}

/// Span wrapping one inbound request on one listener.
pub fn request_span<B>(id: &Identity, port: u16, request: &Request<B>) -> Span {
    tracing::info_span!(
        "request",
        probe = %id,
        port = port,
        method = %request.method(),
        uri = %request.uri(),
    )
}
