// ── Core error types ──
//
// One variant per failure kind of a comparison run. Every one of them is
// fatal: the pipeline returns on the first error and nothing is retried.
// Consumers never see HTTP status codes directly; API failures are folded
// into `Retrieval` with the zone they happened on.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Credentials or connection settings for an account cannot be used.
    #[error("Configuration error for account '{account}': {message}")]
    Configuration { account: String, message: String },

    /// No zone with the requested name exists in the account.
    #[error("Zone '{zone}' not found (available: {})", format_available(.available))]
    ZoneNotFound {
        zone: String,
        available: Vec<String>,
    },

    /// Any failure while resolving or paginating a zone.
    #[error("Failed to retrieve zone '{zone}': {reason}")]
    Retrieval {
        zone: String,
        reason: String,
        /// Whether the underlying failure looked temporary (throttling, timeouts).
        transient: bool,
    },

    /// An output artifact could not be written.
    #[error("Failed to write artifact {}: {reason}", .path.display())]
    Persist { path: PathBuf, reason: String },
}

fn format_available(names: &[String]) -> String {
    if names.is_empty() {
        "none".into()
    } else {
        names.join(", ")
    }
}

impl CoreError {
    /// Wrap an API failure as a retrieval error for `zone`.
    pub fn retrieval(zone: &str, err: &zonediff_api::Error) -> Self {
        let reason = match err.api_error_code() {
            Some(code) => format!("{err} [{code}]"),
            None => err.to_string(),
        };
        Self::Retrieval {
            zone: zone.to_owned(),
            reason,
            transient: err.is_transient(),
        }
    }
}
