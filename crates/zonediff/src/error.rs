//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a stable exit code each.

use miette::Diagnostic;
use thiserror::Error;

use zonediff_config::ConfigError;
use zonediff_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const RETRIEVAL: i32 = 5;
    pub const PERSIST: i32 = 6;
    pub const DIFFERENCES: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(zonediff::no_credentials),
        help(
            "Store a key with: zonediff config set-key {profile}\n\
             Or pass --old-api-key / --new-api-key, or set api_key_env in the profile."
        )
    )]
    NoCredentials { profile: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(zonediff::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: zonediff config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No profile '{profile}' and no endpoint given")]
    #[diagnostic(
        code(zonediff::no_config),
        help(
            "Create a profile with: zonediff config init\n\
             Expected config at: {path}\n\
             Or pass --old-endpoint / --new-endpoint with an API key."
        )
    )]
    NoConfig { profile: String, path: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(zonediff::config), help("Check the config file with: zonediff config show"))]
    Config { message: String },

    #[error("Cannot use account '{account}': {message}")]
    #[diagnostic(code(zonediff::account))]
    Account { account: String, message: String },

    #[error("Keyring error for profile '{profile}': {message}")]
    #[diagnostic(
        code(zonediff::keyring),
        help("Fall back to api_key_env or a plaintext api_key in the profile.")
    )]
    Keyring { profile: String, message: String },

    // ── Run failures ─────────────────────────────────────────────────
    #[error("Zone '{zone}' not found")]
    #[diagnostic(
        code(zonediff::zone_not_found),
        help("Zones in this account: {available}\nZone names must match exactly, trailing dot included.")
    )]
    ZoneNotFound { zone: String, available: String },

    #[error("Failed to retrieve zone '{zone}': {reason}")]
    #[diagnostic(code(zonediff::retrieval), help("{hint}"))]
    Retrieval {
        zone: String,
        reason: String,
        hint: String,
    },

    #[error("Failed to write artifact {path}: {reason}")]
    #[diagnostic(
        code(zonediff::persist),
        help("Check that --output-dir is writable, or pass --no-emit.")
    )]
    Persist { path: String, reason: String },

    #[error("Zones differ: {missing} missing, {mismatched} mismatched")]
    #[diagnostic(code(zonediff::differences))]
    DifferencesFound { missing: usize, mismatched: usize },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(zonediff::validation))]
    Validation { field: String, reason: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoCredentials { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::Config { .. }
            | Self::Account { .. }
            | Self::Keyring { .. } => exit_code::CONFIG,
            Self::ZoneNotFound { .. } => exit_code::NOT_FOUND,
            Self::Retrieval { .. } => exit_code::RETRIEVAL,
            Self::Persist { .. } => exit_code::PERSIST,
            Self::DifferencesFound { .. } => exit_code::DIFFERENCES,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration { account, message } => Self::Account { account, message },

            CoreError::ZoneNotFound { zone, available } => Self::ZoneNotFound {
                zone,
                available: join_or_none(&available),
            },

            CoreError::Retrieval {
                zone,
                reason,
                transient,
            } => Self::Retrieval {
                zone,
                reason,
                hint: if transient {
                    "The service looked temporarily unavailable or throttled. Re-run the comparison."
                        .into()
                } else {
                    "Check the endpoint, API key and zone, or re-run with -v for request details."
                        .into()
                },
            },

            CoreError::Persist { path, reason } => Self::Persist {
                path: path.display().to_string(),
                reason,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::ProfileNotFound { name, available } => Self::ProfileNotFound {
                name,
                available: join_or_none(&available),
            },
            ConfigError::Keyring { profile, message } => Self::Keyring { profile, message },
            ConfigError::Io(e) => Self::Io(e),
            other @ (ConfigError::Validation { .. }
            | ConfigError::Serialization(_)
            | ConfigError::Figment(_)) => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
