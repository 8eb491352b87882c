//! Response composition for the `/call` relay.
//!
//! # Relay format
//! ```text
//! Server:
//! 	<id>
//! Called:
//! 	<target>
//! Response Status Code:
//! 	<status>
//! Response Body:
//! 	<downstream body, every line indented>
//! ```
//! The indentation keeps nested relays readable when probes call probes.

use std::error::Error;
use std::fmt::Write;

use crate::identity::Identity;

/// Prefix every non-empty line of `text` with `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len() + prefix.len());
    for line in text.split_inclusive('\n') {
        if line != "\n" {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

/// Body returned to the caller when the downstream answered.
pub fn relay_body(id: &Identity, target: &str, status: u16, body: &str) -> String {
    format!(
        "Server:\n\t{id}\nCalled:\n\t{target}\nResponse Status Code:\n\t{status}\nResponse Body:\n{}",
        indent(body, "\t")
    )
}

/// Body returned to the caller when the downstream could not be reached.
pub fn call_failure_body(id: &Identity, target: &str, error: &(dyn Error + 'static)) -> String {
    format!("{id} GET {target:?} failed: {}", error_chain(error))
}

/// `error: cause: root cause`, skipping causes already spelled out by their parent.
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            let _ = write!(out, ": {text}");
        }
        source = cause.source();
    }
    out
}
