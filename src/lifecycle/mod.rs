//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse flags → Load config → Resolve identity → Start listeners
//!
//! Shutdown (shutdown.rs):
//!     Signal received → StopSignal to each listener → Drain → Exit 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Without a signal the probe runs until killed
//! - A listener that fails does not trigger shutdown of its siblings

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, StopSignal};
pub use signals::wait_for_signal;
