// ── Result sink ──
//
// Persists collections and diff output as JSON artifacts. One call writes
// one artifact; a failed write is fatal for the run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::CoreError;

/// The artifacts a comparison run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    OldRecords,
    NewRecords,
    Missing,
    Mismatched,
}

impl ArtifactKind {
    fn suffix(self) -> &'static str {
        match self {
            Self::OldRecords => "old",
            Self::NewRecords => "new",
            Self::Missing => "missing",
            Self::Mismatched => "mismatched",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Artifact label for `zone`: trailing dot dropped, anything outside
/// `[A-Za-z0-9._-]` replaced by `_`, then `.{kind}`.
///
/// `artifact_label("foobar.ai.", ArtifactKind::Missing)` is `foobar.ai.missing`.
pub fn artifact_label(zone: &str, kind: ArtifactKind) -> String {
    let stem: String = zone
        .strip_suffix('.')
        .unwrap_or(zone)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.{kind}")
}

/// Destination for run artifacts.
pub trait ResultSink {
    /// Write `data` under `label`, returning where it went.
    fn persist<T: Serialize + ?Sized>(&mut self, label: &str, data: &T) -> Result<PathBuf, CoreError>;
}

/// Writes each artifact as pretty-printed `{dir}/{label}.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResultSink for JsonFileSink {
    fn persist<T: Serialize + ?Sized>(&mut self, label: &str, data: &T) -> Result<PathBuf, CoreError> {
        let path = self.dir.join(format!("{label}.json"));
        let persist_err = |reason: String| CoreError::Persist {
            path: path.clone(),
            reason,
        };

        std::fs::create_dir_all(&self.dir).map_err(|e| persist_err(e.to_string()))?;
        let mut body = serde_json::to_vec_pretty(data).map_err(|e| persist_err(e.to_string()))?;
        body.push(b'\n');
        std::fs::write(&path, body).map_err(|e| persist_err(e.to_string()))?;

        info!(path = %path.display(), "wrote artifact");
        Ok(path)
    }
}
