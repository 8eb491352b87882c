//! TCP listener binding.
//!
//! # Responsibilities
//! - Bind one configured port on all interfaces
//! - Describe bind and serve failures for the listener task that owns them

use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The accept/serve loop ended with an error.
    #[error("Listener on port {port} failed: {source}")]
    Serve {
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

/// Address a role port binds to.
pub fn to_address(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
}

/// Bind the given port on every interface.
pub async fn bind(port: u16) -> Result<TcpListener, ListenerError> {
    let addr = to_address(port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listener bound");
    }

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_address_binds_all_interfaces() {
        assert_eq!(to_address(9000).to_string(), "0.0.0.0:9000");
    }

    #[tokio::test]
    async fn test_bind_conflict_reports_address() {
        let first = bind(0).await.unwrap();
        let port = first.local_addr().unwrap().port();

        let err = bind(port).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { .. }));
        assert!(err.to_string().contains(&port.to_string()));
    }
}
