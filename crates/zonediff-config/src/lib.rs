//! Shared configuration for zonediff.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `zonediff_core::AccountConfig`. The binary layers its
//! command-line overrides on top of what this crate resolves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use zonediff_core::{AccountConfig, RecordType, TlsVerification, TypeExclusions};

/// Keyring service name API keys are stored under.
pub const KEYRING_SERVICE: &str = "zonediff";

/// Prefix for environment overrides of config keys. Nested keys are
/// separated by `__`, e.g. `ZONEDIFF_DEFAULTS__OUTPUT_DIR`.
pub const ENV_PREFIX: &str = "ZONEDIFF_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("keyring error for profile '{profile}': {message}")]
    Keyring { profile: String, message: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Profile used for the old side when none is given.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Directory artifacts are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Record types whose differences are not reported.
    #[serde(default = "default_exclude_types")]
    pub exclude_types: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            output_dir: default_output_dir(),
            exclude_types: default_exclude_types(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_exclude_types() -> Vec<String> {
    TypeExclusions::zone_apex_defaults()
        .iter()
        .map(|t| t.as_str().to_owned())
        .collect()
}

impl Defaults {
    /// Parse `exclude_types` into a typed exclusion set.
    pub fn exclusions(&self) -> Result<TypeExclusions, ConfigError> {
        self.exclude_types
            .iter()
            .map(|raw| {
                raw.parse::<RecordType>().map_err(|_| ConfigError::Validation {
                    field: "defaults.exclude_types".into(),
                    reason: format!("unknown record type '{raw}'"),
                })
            })
            .collect()
    }
}

/// A named DNS hosting account.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://dns.example.net").
    pub endpoint: String,

    /// API key (plaintext -- prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Items requested per page.
    pub page_size: Option<u32>,

    /// Hard cap on pages per listing.
    pub max_pages: Option<usize>,
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.profiles.keys().cloned().collect(),
            })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("net", "zonediff", "zonediff").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("zonediff");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from `path` + environment. A missing file yields
/// the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "loaded config");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key"))
}

/// Resolve an API key from the credential chain (no CLI flag step):
/// `api_key_env` variable, then system keyring, then plaintext.
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            debug!(profile = profile_name, source = "env", "resolved API key");
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            debug!(profile = profile_name, source = "keyring", "resolved API key");
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        debug!(profile = profile_name, source = "config", "resolved API key");
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store an API key in the system keyring for `profile_name`.
pub fn store_api_key(profile_name: &str, key: &SecretString) -> Result<(), ConfigError> {
    let keyring_err = |e: keyring::Error| ConfigError::Keyring {
        profile: profile_name.into(),
        message: e.to_string(),
    };
    keyring_entry(profile_name)
        .map_err(keyring_err)?
        .set_password(key.expose_secret())
        .map_err(keyring_err)
}

// ── Translation to core ─────────────────────────────────────────────

/// Build an `AccountConfig` from a profile with an already-resolved key.
pub fn profile_to_account_with_key(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    api_key: SecretString,
) -> Result<AccountConfig, ConfigError> {
    let endpoint: url::Url = profile.endpoint.parse().map_err(|_| ConfigError::Validation {
        field: format!("profiles.{profile_name}.endpoint"),
        reason: format!("invalid URL: {}", profile.endpoint),
    })?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let page_size = profile.page_size.unwrap_or(AccountConfig::DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err(ConfigError::Validation {
            field: format!("profiles.{profile_name}.page_size"),
            reason: "must be at least 1".into(),
        });
    }
    let max_pages = profile.max_pages.unwrap_or(AccountConfig::DEFAULT_MAX_PAGES);
    if max_pages == 0 {
        return Err(ConfigError::Validation {
            field: format!("profiles.{profile_name}.max_pages"),
            reason: "must be at least 1".into(),
        });
    }

    Ok(AccountConfig {
        name: profile_name.into(),
        endpoint,
        api_key,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        page_size,
        max_pages,
    })
}
