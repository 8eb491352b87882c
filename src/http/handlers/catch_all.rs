//! Fallback for any path no role registered.

use std::fmt::Write;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::request::read_body_lenient;
use crate::identity::Identity;

#[derive(Debug, Clone)]
pub struct CatchAllHandler {
    id: Identity,
}

impl CatchAllHandler {
    pub fn new(id: Identity) -> Self {
        Self { id }
    }

    /// `<id> default handler echoing: "<body>"`, body quoted and escaped.
    pub fn respond(&self, status: StatusCode, body: &[u8]) -> Response {
        let quoted = quote_bytes(body);
        (status, format!("{} default handler echoing: {quoted}", self.id)).into_response()
    }
}

/// Double-quoted literal of `body`. Valid UTF-8 is escaped like a Rust string,
/// each invalid byte is written as `\xNN`, so distinct bodies stay distinct.
pub fn quote_bytes(body: &[u8]) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    out.push('"');
    for chunk in body.utf8_chunks() {
        for c in chunk.valid().chars() {
            match c {
                '\'' => out.push(c),
                _ => out.extend(c.escape_debug()),
            }
        }
        for byte in chunk.invalid() {
            let _ = write!(out, "\\x{byte:02x}");
        }
    }
    out.push('"');
    out
}

pub async fn catch_all(State(handler): State<CatchAllHandler>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    tracing::info!(path = %parts.uri.path(), headers = ?parts.headers, "Got catch-all request");

    let (status, body) = read_body_lenient(body).await;
    handler.respond(status, &body)
}
