// ── Domain model ──

pub mod record;
pub mod record_type;
pub mod zone;

pub use record::{
    AliasTarget, CidrRoutingConfig, FailoverRole, GeoLocation, RecordCollection, RecordSet,
    ResourceRecord,
};
pub use record_type::RecordType;
pub use zone::{ResolvedZone, ZoneId};
