//! Clap derive structures for the `zonediff` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of crate-internal imports so `build.rs` can compile it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// zonediff -- check that a DNS zone survived a migration
#[derive(Debug, Parser)]
#[command(
    name = "zonediff",
    version,
    about = "Compare DNS zones and report missing and mismatched record sets",
    long_about = "Fetches every record set of an old zone and a new zone, pairs them by\n\
        name and type, and reports old record sets that are missing from the new\n\
        zone or whose content differs.\n\n\
        Either side can be a live hosting account (via a config profile) or a\n\
        JSON snapshot written by a previous run.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "ZONEDIFF_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "ZONEDIFF_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors, and print no results
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log line format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Accept invalid TLS certificates from the hosting API
    #[arg(long, short = 'k', env = "ZONEDIFF_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "ZONEDIFF_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary plus a table of differences (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one difference per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

/// How old and new record sets are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchBy {
    /// Name and type only; routing variants collapse onto the first one
    NameType,
    /// Name, type and set identifier
    NameTypeSetIdentifier,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare an old zone against a new zone
    #[command(alias = "diff")]
    Compare(Box<CompareArgs>),

    /// Manage configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPARE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CompareArgs {
    /// Zone to check, exactly as the old account names it (e.g. "example.com.")
    #[arg(long)]
    pub old_zone: String,

    /// Zone in the new account [default: same as --old-zone]
    #[arg(long)]
    pub new_zone: Option<String>,

    // ── Old side ────────────────────────────────────────────────────
    /// Profile for the old account [default: config default_profile]
    #[arg(long, conflicts_with = "old_snapshot")]
    pub old_profile: Option<String>,

    /// API endpoint for the old account (overrides the profile)
    #[arg(long, conflicts_with = "old_snapshot")]
    pub old_endpoint: Option<String>,

    /// API key for the old account (overrides the profile's credentials)
    #[arg(long, env = "ZONEDIFF_OLD_API_KEY", hide_env_values = true)]
    pub old_api_key: Option<String>,

    /// Read the old side from a JSON snapshot instead of an account
    #[arg(long, value_name = "FILE")]
    pub old_snapshot: Option<PathBuf>,

    // ── New side ────────────────────────────────────────────────────
    /// Profile for the new account [default: the old profile]
    #[arg(long, conflicts_with = "new_snapshot")]
    pub new_profile: Option<String>,

    /// API endpoint for the new account (overrides the profile)
    #[arg(long, conflicts_with = "new_snapshot")]
    pub new_endpoint: Option<String>,

    /// API key for the new account (overrides the profile's credentials)
    #[arg(long, env = "ZONEDIFF_NEW_API_KEY", hide_env_values = true)]
    pub new_api_key: Option<String>,

    /// Read the new side from a JSON snapshot instead of an account
    #[arg(long, value_name = "FILE")]
    pub new_snapshot: Option<PathBuf>,

    // ── Behavior ────────────────────────────────────────────────────
    /// Only inventory the old zone; skip the new zone and the diff
    #[arg(long, conflicts_with_all = ["new_zone", "new_profile", "new_endpoint", "new_snapshot", "fail_on_diff"])]
    pub skip_new: bool,

    /// Do not write JSON artifacts
    #[arg(long)]
    pub no_emit: bool,

    /// Directory for JSON artifacts [default: config output_dir, else .]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Never report differences for this record type (repeatable)
    #[arg(long = "exclude-type", value_name = "TYPE", value_delimiter = ',')]
    pub exclude_types: Vec<String>,

    /// Start from an empty exclusion set instead of the configured one
    #[arg(long)]
    pub no_default_excludes: bool,

    /// How record sets are paired between the zones
    #[arg(long, default_value = "name-type-set-identifier")]
    pub match_by: MatchBy,

    /// Exit with code 10 when any difference is found
    #[arg(long)]
    pub fail_on_diff: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display the resolved configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a profile's API key in the system keyring
    SetKey {
        /// Profile name
        profile: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
