//! Wire types for the hosted-zone API.
//!
//! All types match the JSON bodies under `/2013-04-01/`. Field names are
//! PascalCase on the wire, via `#[serde(rename_all = "PascalCase")]`.

use serde::{Deserialize, Serialize};

// ── Hosted zones ─────────────────────────────────────────────────────

/// One hosted zone -- from `GET /2013-04-01/hostedzone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZone {
    /// Opaque zone id, usually prefixed with `/hostedzone/`.
    pub id: String,
    /// Zone apex, normally with a trailing dot (`example.com.`).
    pub name: String,
    #[serde(default)]
    pub caller_reference: Option<String>,
    #[serde(default)]
    pub resource_record_set_count: Option<i64>,
    #[serde(default)]
    pub config: Option<HostedZoneConfig>,
}

impl HostedZone {
    /// The id without its `/hostedzone/` prefix, as used in request paths.
    pub fn bare_id(&self) -> &str {
        bare_zone_id(&self.id)
    }
}

/// Strip the `/hostedzone/` prefix the service puts on zone ids.
pub fn bare_zone_id(id: &str) -> &str {
    id.strip_prefix("/hostedzone/").unwrap_or(id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZoneConfig {
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub private_zone: bool,
}

/// A page of hosted zones. `next_marker` continues the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZonesPage {
    #[serde(default)]
    pub hosted_zones: Vec<HostedZone>,
    #[serde(default)]
    pub is_truncated: bool,
    #[serde(default)]
    pub next_marker: Option<String>,
    #[serde(default)]
    pub max_items: Option<String>,
}

// ── Record sets ──────────────────────────────────────────────────────

/// A single resource record value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecord {
    pub value: String,
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
    #[serde(default)]
    pub continent_code: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub subdivision_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CidrRoutingConfig {
    pub collection_id: String,
    pub location_name: String,
}

/// One resource record set as returned by the service.
///
/// `record_type` stays a raw string here; `zonediff-core` parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecordSet {
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(default)]
    pub set_identifier: Option<String>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub geo_location: Option<GeoLocation>,
    /// `PRIMARY` or `SECONDARY`.
    #[serde(default)]
    pub failover: Option<String>,
    #[serde(default)]
    pub multi_value_answer: Option<bool>,
    #[serde(default, rename = "TTL")]
    pub ttl: Option<i64>,
    #[serde(default)]
    pub resource_records: Vec<ResourceRecord>,
    #[serde(default)]
    pub alias_target: Option<AliasTarget>,
    #[serde(default)]
    pub health_check_id: Option<String>,
    #[serde(default)]
    pub traffic_policy_instance_id: Option<String>,
    #[serde(default)]
    pub cidr_routing_config: Option<CidrRoutingConfig>,
}

/// A page of record sets. When `is_truncated`, the `next_record_*`
/// triple is the cursor for the following request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordSetsPage {
    #[serde(default)]
    pub resource_record_sets: Vec<ResourceRecordSet>,
    #[serde(default)]
    pub is_truncated: bool,
    #[serde(default)]
    pub next_record_name: Option<String>,
    #[serde(default)]
    pub next_record_type: Option<String>,
    #[serde(default)]
    pub next_record_identifier: Option<String>,
    #[serde(default)]
    pub max_items: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_id_strips_prefix() {
        assert_eq!(bare_zone_id("/hostedzone/Z123ABC"), "Z123ABC");
        assert_eq!(bare_zone_id("Z123ABC"), "Z123ABC");
    }

    #[test]
    fn record_set_parses_alias_and_routing_fields() {
        let raw = r#"{
            "Name": "www.example.com.",
            "Type": "A",
            "SetIdentifier": "eu",
            "Weight": 10,
            "AliasTarget": {
                "HostedZoneId": "Z2FDTNDATAQYW2",
                "DNSName": "d111111abcdef8.cloudfront.net.",
                "EvaluateTargetHealth": false
            }
        }"#;
        let rrset: ResourceRecordSet = serde_json::from_str(raw).unwrap();
        assert_eq!(rrset.record_type, "A");
        assert_eq!(rrset.set_identifier.as_deref(), Some("eu"));
        assert_eq!(rrset.weight, Some(10));
        assert!(rrset.resource_records.is_empty());
        assert_eq!(
            rrset.alias_target.unwrap().dns_name,
            "d111111abcdef8.cloudfront.net."
        );
        assert_eq!(rrset.ttl, None);
    }
}
