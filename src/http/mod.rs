//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection on a role port
//!     → server.rs (one axum::serve task per port)
//!     → routes.rs (exact path match, else catch-all)
//!     → handlers/ (echo, call, health, live, catch-all)
//!         call → request.rs (target) → reqwest GET → response.rs (relay)
//!     → response to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;

pub use routes::{build_router, plan_listeners, Handlers, Role};
pub use server::{ListenerSet, ServerError};
