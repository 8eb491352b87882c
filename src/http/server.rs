//! Listener set: one HTTP server per distinct configured port.
//!
//! # Responsibilities
//! - Build the outbound client and the handlers once
//! - Build one router per port from the role plan
//! - Run each port as an independent task and wait for all of them
//!
//! # Design Decisions
//! - A bind or serve failure ends only the task that hit it
//! - `run` returns when every task has returned, which in normal operation
//!   means never (or after a shutdown signal)

use std::collections::BTreeMap;

use axum::Router;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::config::ResolvedConfig;
use crate::http::routes::{build_router, plan_listeners, Handlers};
use crate::lifecycle::shutdown::{Shutdown, StopSignal};
use crate::net::{bind, ListenerError};

/// Error type for assembling the listener set.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to build outbound HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// The probe's HTTP listeners, keyed by port.
pub struct ListenerSet {
    routers: BTreeMap<u16, Router>,
}

impl ListenerSet {
    /// Plan listeners and build every router. Starts the liveness grace period.
    pub fn new(config: &ResolvedConfig) -> Result<Self, ServerError> {
        let client = reqwest::Client::builder().no_proxy().build()?;
        let handlers = Handlers::new(config, client);

        let plan = plan_listeners(config);
        for (port, roles) in &plan {
            let paths: Vec<&str> = roles.iter().flat_map(|role| role.paths()).copied().collect();
            tracing::info!(port = *port, paths = ?paths, "Listening for");
        }

        let routers = plan
            .iter()
            .map(|(port, roles)| (*port, build_router(*port, roles, &handlers)))
            .collect();

        Ok(Self { routers })
    }

    /// Distinct ports, ascending.
    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.routers.keys().copied()
    }

    /// Router serving `port`, if any role is configured there.
    pub fn router(&self, port: u16) -> Option<Router> {
        self.routers.get(&port).cloned()
    }

    /// Serve every port until all listener tasks have returned.
    ///
    /// Returns the number of listeners that ended in error.
    pub async fn run(self, shutdown: &Shutdown) -> usize {
        let mut tasks = JoinSet::new();
        for (port, router) in self.routers {
            let span = tracing::info_span!("listener", port = port);
            tasks.spawn(serve_port(port, router, shutdown.signal()).instrument(span));
        }

        let mut failed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(port)) => tracing::info!(port = port, "Listener stopped"),
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Listener terminated");
                    failed += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Listener task aborted");
                    failed += 1;
                }
            }
        }
        failed
    }
}

async fn serve_port(
    port: u16,
    router: Router,
    stop: StopSignal,
) -> Result<u16, ListenerError> {
    let listener = bind(port).await?;
    tracing::info!("Starting listener");

    axum::serve(listener, router)
        .with_graceful_shutdown(stop.stopped())
        .await
        .map_err(|source| ListenerError::Serve { port, source })?;

    Ok(port)
}
