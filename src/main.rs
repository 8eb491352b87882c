use std::process;

use tracing::Instrument;

use mesh_probe::cli::Cli;
use mesh_probe::lifecycle::{wait_for_signal, Shutdown};
use mesh_probe::observability::init_logging;
use mesh_probe::{ListenerSet, ProbeConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(-1);
        }
    };

    init_logging(config.log_format);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Startup failed");
        process::exit(-1);
    }
}

async fn run(config: ProbeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config = config.resolve();
    let span = tracing::info_span!("probe", id = %config.id);

    async move {
        tracing::info!(
            serving_port = config.serving_port,
            health_port = config.health_port,
            liveness_port = config.liveness_port,
            healthy = config.healthy,
            liveness_delay = ?config.liveness_delay,
            "mesh-probe v{} starting",
            env!("CARGO_PKG_VERSION")
        );

        let listeners = ListenerSet::new(&config)?;
        let shutdown = Shutdown::new();

        let run = listeners.run(&shutdown);
        tokio::pin!(run);

        let failed = tokio::select! {
            failed = &mut run => failed,
            _ = wait_for_signal() => {
                let draining = shutdown.trigger();
                tracing::info!(listeners = draining, "Shutdown signal received, draining");
                run.await
            }
        };

        tracing::info!(failed_listeners = failed, "All listeners stopped");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await
}
