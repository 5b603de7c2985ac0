//! CLI configuration -- thin wrapper around `zonediff_config` shared types.
//!
//! Adds the resolution steps that depend on command-line flags: the
//! `--config` path, per-side profile/endpoint/key overrides, and the global
//! `--insecure` / `--timeout` switches.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use zonediff_core::{AccountConfig, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use zonediff_config::{Config, Profile};

// ── Loading and saving ──────────────────────────────────────────────

/// The config file in effect: `--config` / `ZONEDIFF_CONFIG`, else the
/// platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(zonediff_config::config_path)
}

/// Load the config in effect. A missing file yields the defaults.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(zonediff_config::load_config_from(&config_path(global))?)
}

/// Write `cfg` to the config in effect, returning its path.
pub fn save(global: &GlobalOpts, cfg: &Config) -> Result<PathBuf, CliError> {
    let path = config_path(global);
    zonediff_config::save_config_to(cfg, &path)?;
    Ok(path)
}

// ── Output settings ─────────────────────────────────────────────────

/// `--output`, else the config default, else table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&cfg.defaults.output, true).ok())
        .unwrap_or(OutputFormat::Table)
}

/// `--color` when given explicitly, else the config default.
pub fn color_mode(global: &GlobalOpts, cfg: &Config) -> ColorMode {
    if global.color != ColorMode::Auto {
        return global.color;
    }
    ColorMode::from_str(&cfg.defaults.color, true).unwrap_or(ColorMode::Auto)
}

// ── Account resolution ──────────────────────────────────────────────

/// Command-line overrides for one side of a comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountOverrides<'a> {
    pub profile: Option<&'a str>,
    pub endpoint: Option<&'a str>,
    pub api_key: Option<&'a str>,
}

/// Resolve one side's `AccountConfig` from config, flags, and credentials.
///
/// `fallback_profile` is used when no profile was named on the command line.
/// A profile that doesn't exist is only an error when it was named
/// explicitly or no endpoint override is available.
pub fn resolve_account(
    cfg: &Config,
    overrides: AccountOverrides<'_>,
    fallback_profile: &str,
    global: &GlobalOpts,
) -> Result<AccountConfig, CliError> {
    let profile_name = overrides.profile.unwrap_or(fallback_profile);

    let mut profile = match (cfg.profiles.get(profile_name), overrides.endpoint) {
        (Some(profile), _) => profile.clone(),
        (None, Some(_)) if overrides.profile.is_none() => Profile::default(),
        (None, _) if overrides.profile.is_some() || !cfg.profiles.is_empty() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name.into(),
                available: cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
            });
        }
        (None, _) => {
            return Err(CliError::NoConfig {
                profile: profile_name.into(),
                path: config_path(global).display().to_string(),
            });
        }
    };

    // 1. Endpoint (flag > profile)
    if let Some(endpoint) = overrides.endpoint {
        profile.endpoint = endpoint.to_owned();
    }

    // 2. Credentials (flag > env > keyring > plaintext)
    let api_key = match overrides.api_key {
        Some(key) => SecretString::from(key.to_owned()),
        None => zonediff_config::resolve_api_key(&profile, profile_name)?,
    };

    let mut account = zonediff_config::profile_to_account_with_key(
        &profile,
        profile_name,
        &cfg.defaults,
        api_key,
    )?;

    // 3. Global transport overrides
    if global.insecure {
        account.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        account.timeout = Duration::from_secs(secs);
    }

    Ok(account)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["zonediff"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["config", "path"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_old_profile() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "old".into(),
            Profile {
                endpoint: "https://old.dns.example.net".into(),
                api_key: Some("from-config".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flag_key_wins_over_profile() {
        let cfg = config_with_old_profile();
        let overrides = AccountOverrides {
            profile: Some("old"),
            api_key: Some("from-flag"),
            ..AccountOverrides::default()
        };
        let account = resolve_account(&cfg, overrides, "default", &global(&[])).unwrap();
        assert_eq!(account.api_key.expose_secret(), "from-flag");
        assert_eq!(account.endpoint.as_str(), "https://old.dns.example.net/");
    }

    #[test]
    fn global_flags_override_transport() {
        let cfg = config_with_old_profile();
        let overrides = AccountOverrides {
            profile: Some("old"),
            ..AccountOverrides::default()
        };
        let account =
            resolve_account(&cfg, overrides, "default", &global(&["-k", "--timeout", "7"]))
                .unwrap();
        assert_eq!(account.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(account.timeout, Duration::from_secs(7));
    }

    #[test]
    fn endpoint_without_profile_needs_a_key() {
        let cfg = Config::default();
        let overrides = AccountOverrides {
            endpoint: Some("https://dns.example.net"),
            ..AccountOverrides::default()
        };
        let err = resolve_account(&cfg, overrides, "default", &global(&[])).unwrap_err();
        assert!(matches!(err, CliError::NoCredentials { .. }));

        let overrides = AccountOverrides {
            api_key: Some("k"),
            ..overrides
        };
        let account = resolve_account(&cfg, overrides, "default", &global(&[])).unwrap();
        assert_eq!(account.name, "default");
    }

    #[test]
    fn named_missing_profile_is_reported() {
        let cfg = config_with_old_profile();
        let overrides = AccountOverrides {
            profile: Some("staging"),
            ..AccountOverrides::default()
        };
        match resolve_account(&cfg, overrides, "default", &global(&[])).unwrap_err() {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "staging");
                assert_eq!(available, "old");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_config_without_endpoint_points_at_init() {
        let err = resolve_account(
            &Config::default(),
            AccountOverrides::default(),
            "default",
            &global(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn output_falls_back_to_config() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        assert_eq!(output_format(&global(&[]), &cfg), OutputFormat::Yaml);
        assert_eq!(output_format(&global(&["-o", "json"]), &cfg), OutputFormat::Json);
    }
}
