//! Request handlers.
//!
//! Each handler owns the immutable values it needs (identity, health flag,
//! liveness deadline, outbound client) and is handed to axum as route state.
//! Nothing here is mutated after startup, so handlers run concurrently
//! without locks.

pub mod call;
pub mod catch_all;
pub mod echo;
pub mod health;
pub mod live;

pub use call::CallHandler;
pub use catch_all::CatchAllHandler;
pub use echo::EchoHandler;
pub use health::HealthHandler;
pub use live::LivenessHandler;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    /// Drive one request through a router and collect status and body text.
    pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(body.into())
            .unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// Body that yields `prefix` and then fails mid-stream.
    pub fn failing_body(prefix: impl Into<Bytes>) -> Body {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(prefix.into()),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "peer went away")),
        ];
        Body::from_stream(futures_util::stream::iter(chunks))
    }
}
