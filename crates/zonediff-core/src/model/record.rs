// ── Record set domain types ──
//
// Serialized in the same PascalCase shape the hosting service uses, so the
// JSON artifacts this tool writes can be read back as snapshots.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::record_type::RecordType;

/// A single resource record value (`{"Value": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecord {
    pub value: String,
}

impl From<&str> for ResourceRecord {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasTarget {
    pub hosted_zone_id: String,
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    pub evaluate_target_health: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdivision_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CidrRoutingConfig {
    pub collection_id: String,
    pub location_name: String,
}

/// Failover routing role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum FailoverRole {
    Primary,
    Secondary,
}

/// One DNS resource record set, as retrieved from a zone.
///
/// Snapshots are never mutated. Equality is strict and field-by-field:
/// no trailing-dot, case, TTL or value-order normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordSet {
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: RecordType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failover: Option<FailoverRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_answer: Option<bool>,
    #[serde(default, rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_records: Vec<ResourceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_policy_instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr_routing_config: Option<CidrRoutingConfig>,
}

/// All record sets of one zone, in retrieval order.
pub type RecordCollection = Vec<RecordSet>;

impl RecordSet {
    /// A bare record set with only its name and type set.
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            set_identifier: None,
            weight: None,
            region: None,
            geo_location: None,
            failover: None,
            multi_value_answer: None,
            ttl: None,
            resource_records: Vec::new(),
            alias_target: None,
            health_check_id: None,
            traffic_policy_instance_id: None,
            cidr_routing_config: None,
        }
    }

    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_values<'a>(mut self, values: impl IntoIterator<Item = &'a str>) -> Self {
        self.resource_records = values.into_iter().map(ResourceRecord::from).collect();
        self
    }

    pub fn with_set_identifier(mut self, id: impl Into<String>) -> Self {
        self.set_identifier = Some(id.into());
        self
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// The record values joined for display (`a, b`), or the alias target.
    pub fn display_values(&self) -> String {
        match &self.alias_target {
            Some(alias) if self.resource_records.is_empty() => format!("ALIAS {}", alias.dns_name),
            _ => self
                .resource_records
                .iter()
                .map(|r| r.value.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

// Every field is listed explicitly: adding a field to `RecordSet` without
// deciding how it compares is a compile error here.
impl PartialEq for RecordSet {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            name,
            record_type,
            set_identifier,
            weight,
            region,
            geo_location,
            failover,
            multi_value_answer,
            ttl,
            resource_records,
            alias_target,
            health_check_id,
            traffic_policy_instance_id,
            cidr_routing_config,
        } = self;

        *name == other.name
            && *record_type == other.record_type
            && *set_identifier == other.set_identifier
            && *weight == other.weight
            && *region == other.region
            && *geo_location == other.geo_location
            && *failover == other.failover
            && *multi_value_answer == other.multi_value_answer
            && *ttl == other.ttl
            && *resource_records == other.resource_records
            && *alias_target == other.alias_target
            && *health_check_id == other.health_check_id
            && *traffic_policy_instance_id == other.traffic_policy_instance_id
            && *cidr_routing_config == other.cidr_routing_config
    }
}

impl Eq for RecordSet {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_strict_about_trailing_dot() {
        let a = RecordSet::new("www.example.com.", RecordType::Cname).with_values(["x.example.net."]);
        let b = RecordSet::new("www.example.com.", RecordType::Cname).with_values(["x.example.net"]);
        assert_ne!(a, b);
    }

    #[test]
    fn equality_is_strict_about_value_order() {
        let a = RecordSet::new("mx.example.com.", RecordType::Mx).with_values(["10 a.", "20 b."]);
        let b = RecordSet::new("mx.example.com.", RecordType::Mx).with_values(["20 b.", "10 a."]);
        assert_ne!(a, b);
    }

    #[test]
    fn equality_covers_routing_fields() {
        let a = RecordSet::new("w.example.com.", RecordType::A)
            .with_set_identifier("blue")
            .with_weight(10);
        let mut b = a.clone();
        assert_eq!(a, b);
        b.health_check_id = Some("hc-1".into());
        assert_ne!(a, b);
    }

    #[test]
    fn serde_uses_service_shape() {
        let record = RecordSet::new("foobar.ai.", RecordType::Cname)
            .with_values(["_abc.acm-validations.aws."])
            .with_ttl(300);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Name": "foobar.ai.",
                "Type": "CNAME",
                "TTL": 300,
                "ResourceRecords": [{ "Value": "_abc.acm-validations.aws." }]
            })
        );
        let back: RecordSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn display_values_prefers_alias_when_no_records() {
        let mut record = RecordSet::new("example.com.", RecordType::A);
        record.alias_target = Some(AliasTarget {
            hosted_zone_id: "Z2FDTNDATAQYW2".into(),
            dns_name: "d1.cloudfront.net.".into(),
            evaluate_target_health: false,
        });
        assert_eq!(record.display_values(), "ALIAS d1.cloudfront.net.");
    }
}
