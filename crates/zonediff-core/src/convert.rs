// ── API-to-domain type conversions ──
//
// Bridges raw `zonediff_api` wire types into `zonediff_core::model`.
// Nested structures map one-to-one; the only parsing happens on the record
// type and failover role, which are plain strings on the wire.

use thiserror::Error;

use zonediff_api::models as wire;

use crate::model::{
    AliasTarget, CidrRoutingConfig, FailoverRole, GeoLocation, RecordSet, ResolvedZone,
    ResourceRecord, ZoneId,
};

/// A wire record set that has no domain representation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("record set '{name}' has unsupported type '{record_type}'")]
    UnknownRecordType { name: String, record_type: String },

    #[error("record set '{name}' has unknown failover role '{role}'")]
    UnknownFailover { name: String, role: String },
}

// ── Nested structures ──────────────────────────────────────────────

impl From<wire::ResourceRecord> for ResourceRecord {
    fn from(r: wire::ResourceRecord) -> Self {
        Self { value: r.value }
    }
}

impl From<wire::AliasTarget> for AliasTarget {
    fn from(a: wire::AliasTarget) -> Self {
        Self {
            hosted_zone_id: a.hosted_zone_id,
            dns_name: a.dns_name,
            evaluate_target_health: a.evaluate_target_health,
        }
    }
}

impl From<wire::GeoLocation> for GeoLocation {
    fn from(g: wire::GeoLocation) -> Self {
        Self {
            continent_code: g.continent_code,
            country_code: g.country_code,
            subdivision_code: g.subdivision_code,
        }
    }
}

impl From<wire::CidrRoutingConfig> for CidrRoutingConfig {
    fn from(c: wire::CidrRoutingConfig) -> Self {
        Self {
            collection_id: c.collection_id,
            location_name: c.location_name,
        }
    }
}

impl From<&wire::HostedZone> for ResolvedZone {
    fn from(z: &wire::HostedZone) -> Self {
        Self {
            id: ZoneId::new(z.bare_id()),
            name: z.name.clone(),
        }
    }
}

// ── Record set ─────────────────────────────────────────────────────

impl TryFrom<wire::ResourceRecordSet> for RecordSet {
    type Error = ConversionError;

    fn try_from(r: wire::ResourceRecordSet) -> Result<Self, Self::Error> {
        let Ok(record_type) = r.record_type.parse() else {
            return Err(ConversionError::UnknownRecordType {
                name: r.name,
                record_type: r.record_type,
            });
        };

        let failover = match r.failover {
            None => None,
            Some(role) => match role.parse::<FailoverRole>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    return Err(ConversionError::UnknownFailover { name: r.name, role });
                }
            },
        };

        Ok(Self {
            name: r.name,
            record_type,
            set_identifier: r.set_identifier,
            weight: r.weight,
            region: r.region,
            geo_location: r.geo_location.map(Into::into),
            failover,
            multi_value_answer: r.multi_value_answer,
            ttl: r.ttl,
            resource_records: r.resource_records.into_iter().map(Into::into).collect(),
            alias_target: r.alias_target.map(Into::into),
            health_check_id: r.health_check_id,
            traffic_policy_instance_id: r.traffic_policy_instance_id,
            cidr_routing_config: r.cidr_routing_config.map(Into::into),
        })
    }
}
