#![allow(clippy::unwrap_used)]
// Integration tests for `ZoneClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zonediff_api::{Error, PageLimits, TransportConfig, ZoneClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ZoneClient) {
    let server = MockServer::start().await;
    let client = ZoneClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

const ZONES_PATH: &str = "/2013-04-01/hostedzone";
const RRSET_PATH: &str = "/2013-04-01/hostedzone/Z1OLD/rrset";

fn cname(name: &str, value: &str) -> serde_json::Value {
    json!({
        "Name": name,
        "Type": "CNAME",
        "TTL": 300,
        "ResourceRecords": [{ "Value": value }]
    })
}

// ── Hosted zones ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_all_hosted_zones_follows_marker() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(ZONES_PATH))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [{ "Id": "/hostedzone/Z1OLD", "Name": "example.com." }],
            "IsTruncated": true,
            "NextMarker": "Z2NEXT",
            "MaxItems": "1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ZONES_PATH))
        .and(query_param("marker", "Z2NEXT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [{ "Id": "/hostedzone/Z2NEXT", "Name": "example.org." }],
            "IsTruncated": false
        })))
        .mount(&server)
        .await;

    let zones = client
        .list_all_hosted_zones(PageLimits {
            page_size: 1,
            max_pages: 10,
        })
        .await
        .unwrap();

    let names: Vec<_> = zones.iter().map(|z| z.name.as_str()).collect();
    assert_eq!(names, vec!["example.com.", "example.org."]);
    assert_eq!(zones[0].bare_id(), "Z1OLD");
}

// ── Record sets ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_all_record_sets_follows_cursor() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .and(query_param_is_missing("name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [cname("a.example.com.", "x.example.net.")],
            "IsTruncated": true,
            "NextRecordName": "b.example.com.",
            "NextRecordType": "A",
            "NextRecordIdentifier": "blue"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .and(query_param("name", "b.example.com."))
        .and(query_param("type", "A"))
        .and(query_param("identifier", "blue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [{
                "Name": "b.example.com.",
                "Type": "A",
                "SetIdentifier": "blue",
                "Weight": 50,
                "TTL": 60,
                "ResourceRecords": [{ "Value": "192.0.2.10" }]
            }],
            "IsTruncated": false
        })))
        .mount(&server)
        .await;

    // The `/hostedzone/` prefix is stripped when building the path.
    let records = client
        .list_all_record_sets("/hostedzone/Z1OLD", PageLimits::default())
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "a.example.com.");
    assert_eq!(records[1].set_identifier.as_deref(), Some("blue"));
    assert_eq!(records[1].weight, Some(50));
}

#[tokio::test]
async fn test_record_set_pagination_is_capped() {
    let (server, client) = setup().await;

    // A misbehaving service that always claims there is another page.
    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [cname("loop.example.com.", "x.")],
            "IsTruncated": true,
            "NextRecordName": "loop.example.com.",
            "NextRecordType": "CNAME"
        })))
        .expect(3)
        .mount(&server)
        .await;

    let result = client
        .list_all_record_sets(
            "Z1OLD",
            PageLimits {
                page_size: 1,
                max_pages: 3,
            },
        )
        .await;

    assert!(
        matches!(result, Err(Error::PaginationLimit { max_pages: 3 })),
        "expected PaginationLimit, got: {result:?}"
    );
}

#[tokio::test]
async fn test_truncated_page_without_cursor() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [],
            "IsTruncated": true
        })))
        .mount(&server)
        .await;

    let result = client.list_all_record_sets("Z1OLD", PageLimits::default()).await;
    assert!(matches!(result, Err(Error::MissingCursor { .. })));
}

#[tokio::test]
async fn test_failure_on_later_page_discards_earlier_pages() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .and(query_param_is_missing("name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [cname("a.example.com.", "x.example.net.")],
            "IsTruncated": true,
            "NextRecordName": "b.example.com.",
            "NextRecordType": "CNAME"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .and(query_param("name", "b.example.com."))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.list_all_record_sets("Z1OLD", PageLimits::default()).await;
    match result {
        Err(Error::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Api error on page 2, got: {other:?}"),
    }
}

// ── Authentication & errors ─────────────────────────────────────────

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;
    let client = ZoneClient::from_api_key(
        &server.uri(),
        &secrecy::SecretString::from("sekrit".to_owned()),
        &TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path(ZONES_PATH))
        .and(header("X-Api-Key", "sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [],
            "IsTruncated": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let zones = client
        .list_all_hosted_zones(PageLimits::default())
        .await
        .unwrap();
    assert!(zones.is_empty());
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(ZONES_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_hosted_zones(None, 100).await;
    assert!(matches!(result, Err(Error::InvalidApiKey)));
}

#[tokio::test]
async fn test_throttling_carries_retry_after() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let result = client.list_record_sets("Z1OLD", None, 300).await;
    assert!(matches!(
        result,
        Err(Error::RateLimited {
            retry_after_secs: Some(7)
        })
    ));
}

#[tokio::test]
async fn test_structured_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "Code": "NoSuchHostedZone",
            "Message": "No hosted zone found with ID: Z1OLD"
        })))
        .mount(&server)
        .await;

    let err = client.list_record_sets("Z1OLD", None, 300).await.unwrap_err();
    match err {
        Error::Api {
            status,
            ref code,
            ref message,
        } => {
            assert_eq!(status, 404);
            assert_eq!(code.as_deref(), Some("NoSuchHostedZone"));
            assert!(message.contains("Z1OLD"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(ZONES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<xml/>"))
        .mount(&server)
        .await;

    let result = client.list_hosted_zones(None, 100).await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body == "<xml/>"),
        "expected Deserialization error, got: {result:?}"
    );
}
