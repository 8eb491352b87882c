//! Command-line surface.
//!
//! Flags override the optional TOML file, which overrides built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{load_config, parse_duration, ConfigError, ProbeConfig};
use crate::observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "mesh-probe", version)]
#[command(
    about = "Diagnostic server that echoes requests, reports health and liveness, and relays calls to other services",
    long_about = None
)]
pub struct Cli {
    /// Main port to serve on; always on /echo and /call [default: 9000]
    #[arg(short = 's', long = "server-port")]
    pub server_port: Option<u16>,

    /// Port to serve health checks on; always on /health [default: 9000]
    #[arg(short = 'c', long)]
    pub health_port: Option<u16>,

    /// Port to serve liveness checks on; always on /live [default: 9000]
    #[arg(short = 'l', long)]
    pub liveness_port: Option<u16>,

    /// If false, the health check will report unhealthy [default: true]
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub healthy: Option<bool>,

    /// Delay before the server reports being alive, e.g. 1s, 250ms [default: 1s]
    #[arg(long, value_parser = parse_duration)]
    pub liveness_delay: Option<Duration>,

    /// Name that identifies this instance (returned as part of every response)
    #[arg(long)]
    pub id: Option<String>,

    /// TOML file with any of the above settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log output format [default: pretty]
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Parse `std::env::args`.
    ///
    /// Help and version exit 0; any parse error exits with -1.
    pub fn parse_args() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(err) if !err.use_stderr() => err.exit(),
            Err(err) => {
                let _ = err.print();
                std::process::exit(-1);
            }
        }
    }

    /// Layer defaults, the config file (if any), then explicit flags.
    pub fn into_config(self) -> Result<ProbeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProbeConfig::default(),
        };

        if let Some(port) = self.server_port {
            config.serving_port = port;
        }
        if let Some(port) = self.health_port {
            config.health_port = port;
        }
        if let Some(port) = self.liveness_port {
            config.liveness_port = port;
        }
        if let Some(healthy) = self.healthy {
            config.healthy = healthy;
        }
        if let Some(delay) = self.liveness_delay {
            config.liveness_delay = delay;
        }
        if let Some(id) = self.id {
            config.id = Some(id);
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mesh-probe").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_flags_gives_defaults() {
        let config = parse(&[]).unwrap().into_config().unwrap();
        assert_eq!(config.serving_port, 9000);
        assert_eq!(config.health_port, 9000);
        assert_eq!(config.liveness_port, 9000);
        assert!(config.healthy);
        assert_eq!(config.liveness_delay, Duration::from_secs(1));
        assert!(config.id.is_none());
    }

    #[test]
    fn test_short_and_long_flags() {
        let config = parse(&[
            "-s", "8080", "-c", "8081", "--liveness-port", "8082",
            "--liveness-delay", "100ms", "--id", "edge",
        ])
        .unwrap()
        .into_config()
        .unwrap();
        assert_eq!(config.serving_port, 8080);
        assert_eq!(config.health_port, 8081);
        assert_eq!(config.liveness_port, 8082);
        assert_eq!(config.liveness_delay, Duration::from_millis(100));
        assert_eq!(config.id.as_deref(), Some("edge"));
    }

    #[test]
    fn test_healthy_flag_forms() {
        let config = parse(&["--healthy=false"]).unwrap().into_config().unwrap();
        assert!(!config.healthy);

        let config = parse(&["--healthy"]).unwrap().into_config().unwrap();
        assert!(config.healthy);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse(&["-s", "70000"]).is_err());
        assert!(parse(&["--liveness-delay", "eventually"]).is_err());
        assert!(parse(&["--unknown"]).is_err());
    }

    #[test]
    fn test_oversized_liveness_delay_rejected_at_parse() {
        let err = parse(&["--liveness-delay", "300000000000y"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_healthy_value_requires_equals() {
        // `--healthy false` leaves `false` as a stray positional, which is rejected.
        assert!(parse(&["--healthy", "false"]).is_err());
        let config = parse(&["--healthy=true"]).unwrap().into_config().unwrap();
        assert!(config.healthy);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "serving_port = 7000\nhealth_port = 7001\nid = \"from-file\"").unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path, "-c", "7100"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.serving_port, 7000);
        assert_eq!(config.health_port, 7100);
        assert_eq!(config.id.as_deref(), Some("from-file"));
    }
}
