//! Request-side helpers.
//!
//! # Responsibilities
//! - Read request bodies without letting a read failure abort the handler
//! - Resolve the `/call` target from the query or body and normalize it

use axum::body::{Body, Bytes};
use axum::http::StatusCode;

/// Query parameter naming the `/call` target.
pub const TARGET_PARAM: &str = "target";

/// Read a body fully. Bodies are unbounded; the probe applies no size limit.
pub async fn read_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, usize::MAX).await
}

/// Read a body fully, degrading to an empty body and a 500 status on failure.
///
/// The caller keeps going with whatever it has, so the response still carries
/// the instance id.
pub async fn read_body_lenient(body: Body) -> (StatusCode, Bytes) {
    match read_body(body).await {
        Ok(bytes) => (StatusCode::OK, bytes),
        Err(e) => {
            tracing::warn!(error = %e, "Got error reading body");
            (StatusCode::INTERNAL_SERVER_ERROR, Bytes::new())
        }
    }
}

/// First non-empty `target` value in the query string, decoded.
pub fn target_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == TARGET_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Pick the `/call` target: the query parameter first, the whole body otherwise.
///
/// The body is only read when the query names no target. `Ok(None)` means the
/// caller supplied nothing usable; a body read failure is returned as an error.
pub async fn resolve_target(
    query: Option<&str>,
    body: Body,
) -> Result<Option<String>, axum::Error> {
    let raw = match target_from_query(query) {
        Some(target) => {
            tracing::info!(target = %target, "Found target in URI");
            target
        }
        None => {
            let bytes = read_body(body).await?;
            let target = String::from_utf8_lossy(&bytes).into_owned();
            tracing::info!(target = ?target, "Found target in request body");
            target
        }
    };
    Ok(normalize_target(&raw))
}

/// Trim the raw target and give it a scheme when it lacks one.
///
/// Anything already starting with `http` is left alone, so `https://` and
/// `http://` pass through untouched. Returns `None` for a blank target.
pub fn normalize_target(raw: &str) -> Option<String> {
    let target = raw.trim();
    if target.is_empty() {
        return None;
    }

    if target.starts_with("http") {
        Some(target.to_string())
    } else {
        tracing::debug!("Prefixing target with 'http://'");
        Some(format!("http://{target}"))
    }
}
