// zonediff-core: Record-set diff engine and the pipeline around it.

pub mod compare;
pub mod config;
pub mod convert;
pub mod diff;
pub mod error;
pub mod model;
pub mod sink;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use compare::{ComparisonReport, run_comparison};
pub use config::{AccountConfig, CompareConfig, TlsVerification};
pub use convert::ConversionError;
pub use diff::{DiffResult, IdentityKey, KeyPolicy, MismatchedPair, TypeExclusions, compare, compare_with};
pub use error::CoreError;
pub use sink::{ArtifactKind, JsonFileSink, ResultSink, artifact_label};
pub use source::{RecordSource, RemoteSource, SnapshotSource, ZoneSource};

pub use model::{
    AliasTarget, CidrRoutingConfig, FailoverRole, GeoLocation, RecordCollection, RecordSet,
    RecordType, ResolvedZone, ResourceRecord, ZoneId,
};
