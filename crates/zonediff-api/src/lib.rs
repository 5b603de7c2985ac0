// zonediff-api: Async client for a Route 53-shaped DNS hosting API.

pub mod client;
pub mod error;
pub mod models;
pub mod record_sets;
pub mod transport;
pub mod zones;

pub use client::ZoneClient;
pub use error::Error;
pub use models::{
    AliasTarget, CidrRoutingConfig, GeoLocation, HostedZone, HostedZoneConfig, HostedZonesPage,
    RecordSetsPage, ResourceRecord, ResourceRecordSet,
};
pub use record_sets::{PageLimits, RecordSetCursor};
pub use transport::{TlsMode, TransportConfig};
