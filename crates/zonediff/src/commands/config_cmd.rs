//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Confirm, Input, Select};
use secrecy::{ExposeSecret, SecretString};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext API keys masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.api_key.is_some() {
            profile.api_key = Some(REDACTED.into());
        }
    }
    cfg
}

/// Format an already-redacted config as TOML-like text.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "output_dir = \"{}\"", cfg.defaults.output_dir.display());
    let _ = writeln!(
        out,
        "exclude_types = [{}]",
        cfg.defaults
            .exclude_types
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join(", ")
    );

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "endpoint = \"{}\"", p.endpoint);
        if let Some(ref key) = p.api_key {
            let _ = writeln!(out, "api_key = \"{key}\"");
        }
        if let Some(ref env) = p.api_key_env {
            let _ = writeln!(out, "api_key_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(page_size) = p.page_size {
            let _ = writeln!(out, "page_size = {page_size}");
        }
        if let Some(max_pages) = p.max_pages {
            let _ = writeln!(out, "max_pages = {max_pages}");
        }
    }

    out.trim_end().to_owned()
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for a non-empty API key without echoing it.
fn prompt_api_key() -> Result<SecretString, CliError> {
    let key = rpassword::prompt_password("API key: ").map_err(prompt_err)?;
    if key.is_empty() {
        return Err(CliError::Validation {
            field: "api_key".into(),
            reason: "API key cannot be empty".into(),
        });
    }
    Ok(SecretString::from(key))
}

/// Ask where the profile's API key comes from and fill in the profile.
///
/// A key destined for the keyring is returned rather than stored, so the
/// caller can validate the profile first.
fn prompt_credentials(
    profile: &mut Profile,
    profile_name: &str,
) -> Result<Option<SecretString>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Read from an environment variable",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where should the API key come from?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match selection {
        0 => return prompt_api_key().map(Some),
        1 => {
            let var: String = Input::new()
                .with_prompt("Environment variable name")
                .default(format!("{}_DNS_API_KEY", profile_name.to_uppercase()))
                .interact_text()
                .map_err(prompt_err)?;
            profile.api_key_env = Some(var);
        }
        _ => {
            let key = prompt_api_key()?;
            profile.api_key = Some(key.expose_secret().to_owned());
        }
    }
    Ok(None)
}

/// Check a new profile's endpoint and limits before anything is persisted.
fn validate_profile(profile: &Profile, profile_name: &str, cfg: &Config) -> Result<(), CliError> {
    zonediff_config::profile_to_account_with_key(
        profile,
        profile_name,
        &cfg.defaults,
        SecretString::from(String::new()),
    )?;
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let mut cfg = config::load(global)?;
            let config_path = config::config_path(global);
            eprintln!("zonediff configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(if cfg.profiles.is_empty() {
                    "old".into()
                } else {
                    "new".into()
                })
                .interact_text()
                .map_err(prompt_err)?;

            if cfg.profiles.contains_key(&profile_name)
                && !Confirm::new()
                    .with_prompt(format!("Profile '{profile_name}' exists. Overwrite?"))
                    .default(false)
                    .interact()
                    .map_err(prompt_err)?
            {
                eprintln!("Nothing changed.");
                return Ok(());
            }

            let endpoint: String = Input::new()
                .with_prompt("API endpoint")
                .default("https://dns.example.net".into())
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = Profile {
                endpoint,
                ..Profile::default()
            };
            let keyring_key = prompt_credentials(&mut profile, &profile_name)?;
            validate_profile(&profile, &profile_name, &cfg)?;

            if let Some(key) = keyring_key {
                zonediff_config::store_api_key(&profile_name, &key)?;
                eprintln!("   ✓ API key stored in system keyring");
            }
            if let Some(ref env_name) = profile.api_key_env {
                eprintln!("   Export {env_name} before running a comparison.");
            }

            cfg.profiles.insert(profile_name.clone(), profile);
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }

            let path = config::save(global, &cfg)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Profile: {profile_name}");
            eprintln!(
                "\n  Try it: zonediff compare --old-profile {profile_name} --old-zone example.com. --skip-new"
            );
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load(global)?);
            let format = global.output.unwrap_or(OutputFormat::Table);
            let out = output::render_single(format, &cfg, format_config, format_config);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path(global).display());
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load(global)?;
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: zonediff config init");
            } else {
                let default = cfg.default_profile.as_deref().unwrap_or_default();
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load(global)?;
            cfg.profile(&name)?;
            cfg.default_profile = Some(name.clone());
            config::save(global, &cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetKey <profile> ───────────────────────────────────────
        ConfigCommand::SetKey { profile } => {
            let cfg = config::load(global)?;
            cfg.profile(&profile)?;
            let key = prompt_api_key()?;
            zonediff_config::store_api_key(&profile, &key)?;
            eprintln!("✓ API key for '{profile}' stored in system keyring");
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn show_masks_plaintext_keys_only() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "old".into(),
            Profile {
                endpoint: "https://dns.example.net".into(),
                api_key: Some("super-secret".into()),
                api_key_env: Some("OLD_DNS_KEY".into()),
                ..Profile::default()
            },
        );
        let text = format_config(&redacted(&cfg));
        assert!(!text.contains("super-secret"));
        assert!(text.contains("api_key = \"****\""));
        assert!(text.contains("api_key_env = \"OLD_DNS_KEY\""));
        assert!(text.contains("exclude_types = [\"NS\", \"SOA\"]"));
    }

    #[test]
    fn invalid_endpoint_is_rejected_before_persisting() {
        let profile = Profile {
            endpoint: "not a url".into(),
            ..Profile::default()
        };
        let err = validate_profile(&profile, "old", &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }), "unexpected: {err:?}");

        let profile = Profile {
            endpoint: "https://dns.example.net".into(),
            ..Profile::default()
        };
        assert!(validate_profile(&profile, "old", &Config::default()).is_ok());
    }
}
