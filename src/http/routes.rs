//! Route tables.
//!
//! # Responsibilities
//! - Group the three roles (serving, health, liveness) by port
//! - Build one axum `Router` per port: the union of its roles' paths plus
//!   the catch-all fallback
//!
//! # Design Decisions
//! - Roles sharing a port share one router; role paths never collide
//! - Exact path matching: `/echo/` and `/echo/x` fall through to the catch-all

use std::collections::BTreeMap;

use axum::{
    body::Body,
    http::Request,
    routing::{any, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::ResolvedConfig;
use crate::http::handlers::{
    call, catch_all, echo, health, live, CallHandler, CatchAllHandler, EchoHandler,
    HealthHandler, LivenessHandler,
};
use crate::identity::Identity;
use crate::observability::request_span;

pub const ECHO_PATH: &str = "/echo";
pub const CALL_PATH: &str = "/call";
pub const HEALTH_PATH: &str = "/health";
pub const LIVE_PATH: &str = "/live";

/// What a port is configured to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Serving,
    Health,
    Liveness,
}

impl Role {
    /// Registration order when several roles share a port.
    pub const ALL: [Role; 3] = [Role::Serving, Role::Health, Role::Liveness];

    pub fn paths(self) -> &'static [&'static str] {
        match self {
            Role::Serving => &[ECHO_PATH, CALL_PATH],
            Role::Health => &[HEALTH_PATH],
            Role::Liveness => &[LIVE_PATH],
        }
    }

    pub fn port(self, config: &ResolvedConfig) -> u16 {
        match self {
            Role::Serving => config.serving_port,
            Role::Health => config.health_port,
            Role::Liveness => config.liveness_port,
        }
    }
}

/// Roles per distinct port, each list in role order.
pub fn plan_listeners(config: &ResolvedConfig) -> BTreeMap<u16, Vec<Role>> {
    let mut plan: BTreeMap<u16, Vec<Role>> = BTreeMap::new();
    for role in Role::ALL {
        plan.entry(role.port(config)).or_default().push(role);
    }
    plan
}

/// Every handler, built once at startup and cloned into each router.
#[derive(Debug, Clone)]
pub struct Handlers {
    pub id: Identity,
    pub echo: EchoHandler,
    pub call: CallHandler,
    pub health: HealthHandler,
    pub live: LivenessHandler,
    pub catch_all: CatchAllHandler,
}

impl Handlers {
    /// Starts the liveness grace period.
    pub fn new(config: &ResolvedConfig, client: reqwest::Client) -> Self {
        let id = config.id.clone();
        Self {
            echo: EchoHandler::new(id.clone()),
            call: CallHandler::new(id.clone(), client),
            health: HealthHandler::new(id.clone(), config.healthy),
            live: LivenessHandler::new(id.clone(), config.liveness_delay),
            catch_all: CatchAllHandler::new(id.clone()),
            id,
        }
    }
}

fn role_routes(role: Role, handlers: &Handlers) -> Router {
    match role {
        Role::Serving => {
            let echo_routes: Router = Router::new()
                .route(ECHO_PATH, any(echo::echo))
                .with_state(handlers.echo.clone());
            let call_routes: Router = Router::new()
                .route(CALL_PATH, any(call::call))
                .with_state(handlers.call.clone());
            echo_routes.merge(call_routes)
        }
        Role::Health => Router::new()
            .route(HEALTH_PATH, any(health::health))
            .with_state(handlers.health.clone()),
        Role::Liveness => Router::new()
            .route(LIVE_PATH, any(live::live))
            .with_state(handlers.live.clone()),
    }
}

/// Router for one listener: its roles' routes, the catch-all, request spans.
pub fn build_router(port: u16, roles: &[Role], handlers: &Handlers) -> Router {
    let router: Router = roles
        .iter()
        .fold(Router::new(), |router, role| router.merge(role_routes(*role, handlers)));

    let fallback: MethodRouter = any(catch_all::catch_all).with_state(handlers.catch_all.clone());
    let id = handlers.id.clone();
    router
        .fallback_service(fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| request_span(&id, port, request)),
        )
}
