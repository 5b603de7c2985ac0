// ── Record sources ──
//
// Where a side of the comparison comes from. `RemoteSource` resolves and
// fetches against the hosting API; `SnapshotSource` reads a JSON array of
// record sets from disk. `ZoneSource` lets the binary pick one per side at
// runtime without boxing futures.

use std::future::Future;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, info};

use zonediff_api::transport::{TlsMode, TransportConfig};
use zonediff_api::{PageLimits, ZoneClient};

use crate::config::{AccountConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{RecordCollection, RecordSet, ResolvedZone, ZoneId};

/// One side of a comparison: resolves zone names and fetches their records.
pub trait RecordSource {
    /// Resolve `zone` to its identity. The name must match exactly,
    /// trailing dot included.
    fn resolve_zone(
        &self,
        zone: &str,
    ) -> impl Future<Output = Result<ResolvedZone, CoreError>> + Send;

    /// Every record set of `zone`, in the order the source returns them.
    /// All-or-nothing: a failure on any page fails the whole fetch.
    fn fetch_all(
        &self,
        zone: &ResolvedZone,
    ) -> impl Future<Output = Result<RecordCollection, CoreError>> + Send;
}

// ── Remote ─────────────────────────────────────────────────────────

/// Records fetched live from a hosting account.
pub struct RemoteSource {
    account: String,
    client: ZoneClient,
    limits: PageLimits,
}

impl RemoteSource {
    /// Build an API client for `config`. Nothing is sent until the first call.
    pub fn connect(config: &AccountConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&config.tls),
            timeout: config.timeout,
        };
        let client = ZoneClient::from_api_key(config.endpoint.as_str(), &config.api_key, &transport)
            .map_err(|e| CoreError::Configuration {
                account: config.name.clone(),
                message: e.to_string(),
            })?;
        debug!(account = %config.name, endpoint = %config.endpoint, "api client ready");

        Ok(Self {
            account: config.name.clone(),
            client,
            limits: PageLimits {
                page_size: config.page_size,
                max_pages: config.max_pages,
            },
        })
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

impl RecordSource for RemoteSource {
    async fn resolve_zone(&self, zone: &str) -> Result<ResolvedZone, CoreError> {
        let zones = self
            .client
            .list_all_hosted_zones(self.limits)
            .await
            .map_err(|e| CoreError::retrieval(zone, &e))?;

        let Some(found) = zones.iter().find(|z| z.name == zone) else {
            return Err(CoreError::ZoneNotFound {
                zone: zone.to_owned(),
                available: zones.into_iter().map(|z| z.name).collect(),
            });
        };

        let resolved = ResolvedZone::from(found);
        info!(account = %self.account, zone, id = %resolved.id, "resolved zone");
        Ok(resolved)
    }

    async fn fetch_all(&self, zone: &ResolvedZone) -> Result<RecordCollection, CoreError> {
        let raw = self
            .client
            .list_all_record_sets(zone.id.as_str(), self.limits)
            .await
            .map_err(|e| CoreError::retrieval(&zone.name, &e))?;

        let records = raw
            .into_iter()
            .map(RecordSet::try_from)
            .collect::<Result<RecordCollection, _>>()
            .map_err(|e| CoreError::Retrieval {
                zone: zone.name.clone(),
                reason: e.to_string(),
                transient: false,
            })?;

        info!(account = %self.account, zone = %zone.name, count = records.len(), "fetched record sets");
        Ok(records)
    }
}

// ── Snapshot ───────────────────────────────────────────────────────

/// Records read from a JSON file in the service's record-set shape: either a
/// bare array (this tool's own artifacts) or a listing response wrapped in
/// `{"ResourceRecordSets": [...]}` as the service's CLI prints it.
///
/// The file stands for exactly one zone, so resolution always succeeds
/// and takes the requested name as given.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for SnapshotSource {
    async fn resolve_zone(&self, zone: &str) -> Result<ResolvedZone, CoreError> {
        Ok(ResolvedZone {
            id: ZoneId::new(self.path.display().to_string()),
            name: zone.to_owned(),
        })
    }

    async fn fetch_all(&self, zone: &ResolvedZone) -> Result<RecordCollection, CoreError> {
        let retrieval = |reason: String| CoreError::Retrieval {
            zone: zone.name.clone(),
            reason,
            transient: false,
        };

        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|e| retrieval(format!("cannot read {}: {e}", self.path.display())))?;
        let records: RecordCollection = serde_json::from_slice::<SnapshotFile>(&raw)
            .map_err(|e| retrieval(format!("invalid snapshot {}: {e}", self.path.display())))?
            .into();

        info!(zone = %zone.name, path = %self.path.display(), count = records.len(), "loaded snapshot");
        Ok(records)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Records(RecordCollection),
    Listing(SnapshotListing),
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SnapshotListing {
    resource_record_sets: RecordCollection,
}

impl From<SnapshotFile> for RecordCollection {
    fn from(file: SnapshotFile) -> Self {
        match file {
            SnapshotFile::Records(records) => records,
            SnapshotFile::Listing(listing) => listing.resource_record_sets,
        }
    }
}

// ── Runtime choice ─────────────────────────────────────────────────

/// A remote account or a snapshot file, chosen per side at startup.
pub enum ZoneSource {
    Remote(RemoteSource),
    Snapshot(SnapshotSource),
}

impl RecordSource for ZoneSource {
    async fn resolve_zone(&self, zone: &str) -> Result<ResolvedZone, CoreError> {
        match self {
            Self::Remote(source) => source.resolve_zone(zone).await,
            Self::Snapshot(source) => source.resolve_zone(zone).await,
        }
    }

    async fn fetch_all(&self, zone: &ResolvedZone) -> Result<RecordCollection, CoreError> {
        match self {
            Self::Remote(source) => source.fetch_all(zone).await,
            Self::Snapshot(source) => source.fetch_all(zone).await,
        }
    }
}
