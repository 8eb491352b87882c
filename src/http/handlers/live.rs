//! `/live`: 503 until a startup grace period has passed, 200 afterwards.

use std::time::{Duration, SystemTime};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::time::Instant;

use crate::identity::Identity;

#[derive(Debug, Clone)]
pub struct LivenessHandler {
    id: Identity,
    /// `None` when the delay runs past what the clock can represent.
    deadline: Option<Instant>,
}

impl LivenessHandler {
    /// Start the grace period now.
    pub fn new(id: Identity, delay: Duration) -> Self {
        let deadline = Instant::now().checked_add(delay);
        match SystemTime::now().checked_add(delay) {
            Some(at) if deadline.is_some() => {
                let live_at = humantime::format_rfc3339_millis(at);
                tracing::info!(live_at = %live_at, delay = ?delay, "Liveness deadline set");
            }
            _ => tracing::warn!(delay = ?delay, "Liveness delay out of clock range, never reporting live"),
        }
        Self { id, deadline }
    }

    pub fn with_deadline(id: Identity, deadline: Instant) -> Self {
        Self {
            id,
            deadline: Some(deadline),
        }
    }

    /// Pure function of the clock: once live, always live.
    pub fn is_live_at(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// 200 `<id> - live` at or after the deadline, 503 with an empty body before.
    pub fn respond(&self) -> Response {
        if self.is_live_at(Instant::now()) {
            format!("{} - live", self.id).into_response()
        } else {
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

pub async fn live(State(handler): State<LivenessHandler>, headers: HeaderMap) -> Response {
    tracing::info!(headers = ?headers, "Got liveness request");
    handler.respond()
}
