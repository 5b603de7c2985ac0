//! `compare` handler: builds both record sources, runs the pipeline, and
//! renders the report.

use tracing::debug;

use zonediff_core::{
    CompareConfig, JsonFileSink, KeyPolicy, RecordType, RemoteSource, SnapshotSource,
    TypeExclusions, ZoneSource, run_comparison,
};

use crate::cli::{CompareArgs, GlobalOpts, MatchBy};
use crate::config::{self, AccountOverrides, Config};
use crate::error::CliError;
use crate::output;

// ── Option building ─────────────────────────────────────────────────

impl From<MatchBy> for KeyPolicy {
    fn from(m: MatchBy) -> Self {
        match m {
            MatchBy::NameType => Self::NameType,
            MatchBy::NameTypeSetIdentifier => Self::NameTypeSetIdentifier,
        }
    }
}

/// Configured exclusions (or none with `--no-default-excludes`) plus every
/// `--exclude-type`.
fn exclusions(args: &CompareArgs, cfg: &Config) -> Result<TypeExclusions, CliError> {
    let mut excluded = if args.no_default_excludes {
        TypeExclusions::none()
    } else {
        cfg.defaults.exclusions()?
    };
    for raw in &args.exclude_types {
        let record_type = raw.parse::<RecordType>().map_err(|_| CliError::Validation {
            field: "--exclude-type".into(),
            reason: format!("unknown record type '{raw}'"),
        })?;
        excluded.insert(record_type);
    }
    Ok(excluded)
}

fn compare_config(args: &CompareArgs, cfg: &Config) -> Result<CompareConfig, CliError> {
    Ok(CompareConfig {
        old_zone: args.old_zone.clone(),
        new_zone: args.new_zone.clone().unwrap_or_else(|| args.old_zone.clone()),
        skip_new: args.skip_new,
        emit_artifacts: !args.no_emit,
        excluded_types: exclusions(args, cfg)?,
        key_policy: args.match_by.into(),
    })
}

// ── Source building ─────────────────────────────────────────────────

/// A snapshot file when one was given, otherwise a live account.
fn build_source(
    snapshot: Option<&std::path::Path>,
    overrides: AccountOverrides<'_>,
    fallback_profile: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<ZoneSource, CliError> {
    if let Some(path) = snapshot {
        debug!(path = %path.display(), "using snapshot source");
        return Ok(ZoneSource::Snapshot(SnapshotSource::new(path)));
    }
    let account = config::resolve_account(cfg, overrides, fallback_profile, global)?;
    Ok(ZoneSource::Remote(RemoteSource::connect(&account)?))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: &CompareArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let options = compare_config(args, &cfg)?;
    debug!(
        excluded = ?options.excluded_types.iter().collect::<Vec<_>>(),
        key_policy = %options.key_policy,
        "comparison options"
    );

    let old_profile = args
        .old_profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());
    let new_profile = args.new_profile.clone().unwrap_or_else(|| old_profile.clone());

    let old = build_source(
        args.old_snapshot.as_deref(),
        AccountOverrides {
            profile: args.old_profile.as_deref(),
            endpoint: args.old_endpoint.as_deref(),
            api_key: args.old_api_key.as_deref(),
        },
        &old_profile,
        &cfg,
        global,
    )?;
    let new = if options.skip_new {
        None
    } else {
        Some(build_source(
            args.new_snapshot.as_deref(),
            AccountOverrides {
                profile: args.new_profile.as_deref(),
                endpoint: args.new_endpoint.as_deref(),
                api_key: args.new_api_key.as_deref(),
            },
            &new_profile,
            &cfg,
            global,
        )?)
    };

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| cfg.defaults.output_dir.clone());
    let mut sink = JsonFileSink::new(output_dir);
    if options.emit_artifacts {
        debug!(dir = %sink.dir().display(), "artifact directory");
    }

    let report = run_comparison(&options, &old, new.as_ref(), &mut sink).await?;

    let format = config::output_format(global, &cfg);
    let color = output::should_color(config::color_mode(global, &cfg));
    let out = output::render_report(format, &report, color);
    output::print_output(&out, global.quiet);

    match &report.diff {
        Some(diff) if args.fail_on_diff && report.has_differences() => {
            Err(CliError::DifferencesFound {
                missing: diff.missing.len(),
                mismatched: diff.mismatched.len(),
            })
        }
        _ => Ok(()),
    }
}
