//! `/call`: issue a GET to a caller-chosen target and relay what came back.
//!
//! # Target resolution
//! 1. `?target=` query parameter, when present and non-empty
//! 2. otherwise the whole request body
//! 3. trimmed; a blank target is rejected with 500 and no outbound call
//! 4. `http://` prepended unless the target already starts with `http`
//!
//! # Design Decisions
//! - One attempt only, no retries and no timeout: a hung downstream holds
//!   this request open, which is itself useful signal when debugging
//! - Non-2xx downstream statuses are relayed with 200; only transport
//!   failures become 500

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::request::resolve_target;
use crate::http::response::{call_failure_body, relay_body};
use crate::identity::Identity;

/// Returned when neither the query nor the body names a target.
pub const NO_TARGET_MESSAGE: &str =
    "No target to call - use the ?target query parameter or pass a URL as the request body.";

#[derive(Debug, Clone)]
pub struct CallHandler {
    id: Identity,
    client: reqwest::Client,
}

impl CallHandler {
    pub fn new(id: Identity, client: reqwest::Client) -> Self {
        Self { id, client }
    }

    /// GET `target` and compose the relay response.
    pub async fn relay(&self, target: &str) -> Response {
        tracing::info!(target = %target, "Got call target");

        let response = match self.client.get(target).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(target = %target, error = %e, "GET failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    call_failure_body(&self.id, target, &e),
                )
                    .into_response();
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!(target = %target, error = %e, "Failed reading downstream body");
                format!("could not read body: {e}")
            }
        };

        tracing::info!(
            target = %target,
            status = status.as_u16(),
            "GET succeeded"
        );

        relay_body(&self.id, target, status.as_u16(), &body).into_response()
    }
}

pub async fn call(State(handler): State<CallHandler>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    tracing::info!(
        method = %parts.method,
        uri = %parts.uri,
        headers = ?parts.headers,
        "Got call request"
    );

    let target = match resolve_target(parts.uri.query(), body).await {
        Ok(Some(target)) => target,
        Ok(None) => {
            tracing::warn!("Empty target, aborting call");
            return (StatusCode::INTERNAL_SERVER_ERROR, NO_TARGET_MESSAGE).into_response();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Got error reading body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    handler.relay(&target).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::handlers::test_support::{failing_body, get, post, send};
    use axum::{routing::any, Router};
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    fn router() -> Router {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        Router::new()
            .route("/call", any(call))
            .with_state(CallHandler::new(Identity::new("probe-a"), client))
    }

    /// One-connection-at-a-time downstream that reports each request line it sees.
    async fn downstream(status_line: &'static str, body: &'static str) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]);
                let request_line = head.lines().next().unwrap_or_default().to_string();
                let _ = tx.send(request_line);

                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (addr, rx)
    }

    #[tokio::test]
    async fn test_query_target_wins_over_body() {
        let (query_addr, mut query_hits) = downstream("200 OK", "from query").await;
        let (body_addr, mut body_hits) = downstream("200 OK", "from body").await;

        let uri = format!("/call?target={query_addr}/path");
        let (status, body) = send(router(), post(&uri, body_addr.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(&format!("Called:\n\thttp://{query_addr}/path\n")));
        assert!(body.ends_with("Response Body:\n\tfrom query"));
        assert_eq!(query_hits.recv().await.unwrap(), "GET /path HTTP/1.1");
        assert!(body_hits.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_body_target_is_trimmed() {
        let (addr, mut hits) = downstream("202 Accepted", "ok").await;

        let (status, body) = send(router(), post("/call?target=", format!("  {addr}/x \n"))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(&format!("\thttp://{addr}/x\n")));
        assert!(body.contains("Response Status Code:\n\t202\n"));
        assert_eq!(hits.recv().await.unwrap(), "GET /x HTTP/1.1");
    }

    #[tokio::test]
    async fn test_empty_target_rejected_without_call() {
        let (status, body) = send(router(), post("/call", " \n\t ")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, NO_TARGET_MESSAGE);

        let (status, body) = send(router(), get("/call")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, NO_TARGET_MESSAGE);
    }

    #[tokio::test]
    async fn test_non_2xx_downstream_is_relayed() {
        let (addr, _hits) = downstream("503 Service Unavailable", "down\nfor maintenance").await;

        let (status, body) = send(router(), get(&format!("/call?target={addr}"))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("Server:\n\tprobe-a\n"));
        assert!(body.contains("Response Status Code:\n\t503\n"));
        assert!(body.ends_with("\tdown\n\tfor maintenance"));
    }

    #[tokio::test]
    async fn test_unreachable_target() {
        let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = closed.local_addr().unwrap();
        drop(closed);

        let (status, body) = send(router(), get(&format!("/call?target={addr}"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with(&format!("probe-a GET \"http://{addr}\" failed: ")));
    }

    #[tokio::test]
    async fn test_body_read_failure_makes_no_call() {
        let (addr, mut hits) = downstream("200 OK", "should not be reached").await;
        let (status, body) = send(router(), post("/call", failing_body(addr.to_string()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.is_empty());
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(hits.try_recv().is_err());
    }
}
