// ── Comparison pipeline ──
//
// resolve old -> fetch old -> [resolve new -> fetch new -> diff] -> persist.
// Every step is awaited in sequence and the first error ends the run before
// any artifact is written.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CompareConfig;
use crate::diff::{DiffResult, compare_with};
use crate::error::CoreError;
use crate::model::ResolvedZone;
use crate::sink::{ArtifactKind, ResultSink, artifact_label};
use crate::source::RecordSource;

/// Outcome of one run.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub old_zone: ResolvedZone,
    /// `None` in inventory mode.
    pub new_zone: Option<ResolvedZone>,
    pub old_count: usize,
    pub new_count: Option<usize>,
    /// `None` in inventory mode.
    pub diff: Option<DiffResult>,
    /// Artifacts written, in write order.
    pub artifacts: Vec<PathBuf>,
    pub completed_at: DateTime<Utc>,
}

impl ComparisonReport {
    /// `true` when a diff ran and found something.
    pub fn has_differences(&self) -> bool {
        self.diff.as_ref().is_some_and(|d| !d.is_clean())
    }
}

/// Run one comparison.
///
/// `new` is only consulted when `config.skip_new` is off; passing `None`
/// then is a configuration error.
pub async fn run_comparison<O, N, K>(
    config: &CompareConfig,
    old: &O,
    new: Option<&N>,
    sink: &mut K,
) -> Result<ComparisonReport, CoreError>
where
    O: RecordSource,
    N: RecordSource,
    K: ResultSink,
{
    let mut out = Artifacts {
        enabled: config.emit_artifacts,
        sink,
        written: Vec::new(),
    };

    let old_zone = old.resolve_zone(&config.old_zone).await?;
    let old_records = old.fetch_all(&old_zone).await?;

    if config.skip_new {
        out.emit(&artifact_label(&old_zone.name, ArtifactKind::OldRecords), &old_records)?;
        info!(zone = %old_zone.name, records = old_records.len(), "inventory complete, comparison skipped");
        return Ok(ComparisonReport {
            old_count: old_records.len(),
            old_zone,
            new_zone: None,
            new_count: None,
            diff: None,
            artifacts: out.written,
            completed_at: Utc::now(),
        });
    }

    let Some(new) = new else {
        return Err(CoreError::Configuration {
            account: "new".into(),
            message: "no source configured for the new zone".into(),
        });
    };

    let new_zone = new.resolve_zone(&config.new_zone).await?;
    let new_records = new.fetch_all(&new_zone).await?;

    let diff = compare_with(
        &old_records,
        &new_records,
        &config.excluded_types,
        config.key_policy,
    );

    // Nothing is written until both sides are in hand.
    out.emit(&artifact_label(&old_zone.name, ArtifactKind::OldRecords), &old_records)?;
    out.emit(&artifact_label(&new_zone.name, ArtifactKind::NewRecords), &new_records)?;
    out.emit(&artifact_label(&old_zone.name, ArtifactKind::Mismatched), &diff.mismatched)?;
    out.emit(&artifact_label(&old_zone.name, ArtifactKind::Missing), &diff.missing)?;

    if diff.is_clean() {
        info!(old = %old_zone.name, new = %new_zone.name, missing = 0, mismatched = 0, "zones match");
    } else {
        warn!(
            old = %old_zone.name,
            new = %new_zone.name,
            missing = diff.missing.len(),
            mismatched = diff.mismatched.len(),
            "zones differ"
        );
    }

    Ok(ComparisonReport {
        old_count: old_records.len(),
        new_count: Some(new_records.len()),
        old_zone,
        new_zone: Some(new_zone),
        diff: Some(diff),
        artifacts: out.written,
        completed_at: Utc::now(),
    })
}

struct Artifacts<'a, K> {
    enabled: bool,
    sink: &'a mut K,
    written: Vec<PathBuf>,
}

impl<K: ResultSink> Artifacts<'_, K> {
    fn emit<T: Serialize + ?Sized>(&mut self, label: &str, data: &T) -> Result<(), CoreError> {
        if self.enabled {
            let path = self.sink.persist(label, data)?;
            self.written.push(path);
        }
        Ok(())
    }
}
