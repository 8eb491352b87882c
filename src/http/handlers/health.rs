//! `/health`: fixed health answer chosen at startup.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::identity::Identity;

#[derive(Debug, Clone)]
pub struct HealthHandler {
    id: Identity,
    healthy: bool,
}

impl HealthHandler {
    pub fn new(id: Identity, healthy: bool) -> Self {
        Self { id, healthy }
    }

    /// 200 `<id> - healthy`, or 503 with an empty body.
    pub fn respond(&self) -> Response {
        if self.healthy {
            format!("{} - healthy", self.id).into_response()
        } else {
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

pub async fn health(State(handler): State<HealthHandler>, headers: HeaderMap) -> Response {
    tracing::info!(headers = ?headers, "Got health check request");
    handler.respond()
}
