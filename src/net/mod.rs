//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! configured port
//!     → listener.rs (bind 0.0.0.0:<port>)
//!     → handed to axum::serve by the listener set
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
