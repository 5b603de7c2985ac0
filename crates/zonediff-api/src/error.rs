use thiserror::Error;

/// Top-level error type for the `zonediff-api` crate.
///
/// Covers every failure mode of the hosting API surface: authentication,
/// transport, structured API errors, and pagination.
/// `zonediff-core` folds all of these into a single retrieval failure.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Request rejected for lack of permission (HTTP 403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// API key missing or rejected (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Throttled by the service. Carries `Retry-After` when the service sent one.
    #[error("Rate limited by the DNS service{}", retry_hint(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    // ── API ─────────────────────────────────────────────────────────
    /// Structured error body returned with a non-2xx status.
    #[error("DNS API error (HTTP {status}): {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Pagination ──────────────────────────────────────────────────
    /// The service kept reporting truncated pages past the page cap.
    #[error("Pagination exceeded {max_pages} pages without completing")]
    PaginationLimit { max_pages: usize },

    /// A truncated page arrived without the marker needed to continue.
    #[error("Truncated {listing} page did not include a continuation marker")]
    MissingCursor { listing: &'static str },
}

#[allow(clippy::ref_option)]
fn retry_hint(secs: &Option<u64>) -> String {
    secs.map(|s| format!(" -- retry after {s}s"))
        .unwrap_or_default()
}

impl Error {
    /// Returns `true` if retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Extract the API error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
