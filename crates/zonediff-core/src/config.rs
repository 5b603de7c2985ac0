// ── Runtime configuration ──
//
// These types describe *how* to reach an account and *what* a run does.
// They never touch disk: the binary builds them once at startup and
// passes them down by reference.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::diff::{KeyPolicy, TypeExclusions};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed test gateways only).
    DangerAcceptInvalid,
}

/// Connection settings for one DNS hosting account.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Profile name the settings came from, used in error messages.
    pub name: String,
    /// API endpoint (e.g. `https://dns.example.net`).
    pub endpoint: Url,
    pub api_key: SecretString,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Items requested per page.
    pub page_size: u32,
    /// Hard cap on pages per listing.
    pub max_pages: usize,
}

impl AccountConfig {
    pub const DEFAULT_PAGE_SIZE: u32 = 300;
    pub const DEFAULT_MAX_PAGES: usize = 10_000;
}

/// What a single comparison run does.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub old_zone: String,
    pub new_zone: String,
    /// Inventory-only mode: skip the new side and the diff.
    pub skip_new: bool,
    /// Write JSON artifacts through the result sink.
    pub emit_artifacts: bool,
    pub excluded_types: TypeExclusions,
    pub key_policy: KeyPolicy,
}
