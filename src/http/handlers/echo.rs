//! `/echo`: reflect the request body back, prefixed with the instance id.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::request::read_body_lenient;
use crate::identity::Identity;

#[derive(Debug, Clone)]
pub struct EchoHandler {
    id: Identity,
}

impl EchoHandler {
    pub fn new(id: Identity) -> Self {
        Self { id }
    }

    /// `<id> echoing: <body>`, with the body bytes copied verbatim.
    pub fn respond(&self, status: StatusCode, body: &[u8]) -> Response {
        let prefix = format!("{} echoing: ", self.id);
        let mut out = Vec::with_capacity(prefix.len() + body.len());
        out.extend_from_slice(prefix.as_bytes());
        out.extend_from_slice(body);

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            out,
        )
            .into_response()
    }
}

/// A failed body read still echoes (an empty body) but with status 500.
pub async fn echo(State(handler): State<EchoHandler>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    tracing::info!(headers = ?parts.headers, "Got echo request");

    let (status, body) = read_body_lenient(body).await;
    handler.respond(status, &body)
}
