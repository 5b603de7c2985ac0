#![allow(clippy::unwrap_used)]
// End-to-end tests for `RemoteSource` and the comparison pipeline against a
// mocked hosting API.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zonediff_core::{
    AccountConfig, CompareConfig, CoreError, JsonFileSink, KeyPolicy, RecordSource, RecordType,
    RemoteSource, TlsVerification, TypeExclusions, run_comparison,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn account(server: &MockServer, name: &str) -> AccountConfig {
    AccountConfig {
        name: name.into(),
        endpoint: Url::parse(&server.uri()).unwrap(),
        api_key: SecretString::from(format!("{name}-key")),
        tls: TlsVerification::SystemDefaults,
        timeout: Duration::from_secs(5),
        page_size: AccountConfig::DEFAULT_PAGE_SIZE,
        max_pages: AccountConfig::DEFAULT_MAX_PAGES,
    }
}

async fn mount_zones(server: &MockServer, zones: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": zones,
            "IsTruncated": false
        })))
        .mount(server)
        .await;
}

async fn mount_records(server: &MockServer, zone_id: &str, records: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/2013-04-01/hostedzone/{zone_id}/rrset")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": records,
            "IsTruncated": false
        })))
        .mount(server)
        .await;
}

// ── Resolution ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_resolve_requires_exact_name() {
    let server = MockServer::start().await;
    mount_zones(
        &server,
        json!([
            { "Id": "/hostedzone/Z1", "Name": "example.com." },
            { "Id": "/hostedzone/Z2", "Name": "example.org." }
        ]),
    )
    .await;
    let source = RemoteSource::connect(&account(&server, "old")).unwrap();

    let zone = source.resolve_zone("example.org.").await.unwrap();
    assert_eq!(zone.id.as_str(), "Z2");

    let err = source.resolve_zone("example.org").await.unwrap_err();
    match err {
        CoreError::ZoneNotFound { zone, available } => {
            assert_eq!(zone, "example.org");
            assert_eq!(available, vec!["example.com.", "example.org."]);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_api_key_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone"))
        .and(header("X-Api-Key", "old-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [{ "Id": "Z1", "Name": "example.com." }],
            "IsTruncated": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = RemoteSource::connect(&account(&server, "old")).unwrap();
    source.resolve_zone("example.com.").await.unwrap();
}

#[tokio::test]
async fn test_rejected_key_is_retrieval_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let source = RemoteSource::connect(&account(&server, "old")).unwrap();
    let err = source.resolve_zone("example.com.").await.unwrap_err();
    assert!(matches!(err, CoreError::Retrieval { transient: false, .. }));
}

// ── Fetching ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_converts_records() {
    let server = MockServer::start().await;
    mount_zones(&server, json!([{ "Id": "/hostedzone/Z1", "Name": "example.com." }])).await;
    mount_records(
        &server,
        "Z1",
        json!([
            { "Name": "example.com.", "Type": "NS", "TTL": 172800,
              "ResourceRecords": [{ "Value": "ns-1.example.net." }] },
            { "Name": "www.example.com.", "Type": "CNAME", "TTL": 300,
              "ResourceRecords": [{ "Value": "example.com." }] }
        ]),
    )
    .await;

    let source = RemoteSource::connect(&account(&server, "old")).unwrap();
    let zone = source.resolve_zone("example.com.").await.unwrap();
    let records = source.fetch_all(&zone).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].record_type, RecordType::Ns);
    assert_eq!(records[1].name, "www.example.com.");
}

#[tokio::test]
async fn test_unsupported_type_fails_fetch() {
    let server = MockServer::start().await;
    mount_zones(&server, json!([{ "Id": "Z1", "Name": "example.com." }])).await;
    mount_records(&server, "Z1", json!([{ "Name": "example.com.", "Type": "HINFO" }])).await;

    let source = RemoteSource::connect(&account(&server, "old")).unwrap();
    let zone = source.resolve_zone("example.com.").await.unwrap();
    let err = source.fetch_all(&zone).await.unwrap_err();
    assert!(err.to_string().contains("HINFO"));
}

#[tokio::test]
async fn test_failed_later_page_fails_whole_fetch() {
    let server = MockServer::start().await;
    mount_zones(&server, json!([{ "Id": "Z1", "Name": "example.com." }])).await;
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(query_param_is_missing("name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [
                { "Name": "example.com.", "Type": "TXT", "ResourceRecords": [{ "Value": "\"v\"" }] }
            ],
            "IsTruncated": true,
            "NextRecordName": "www.example.com.",
            "NextRecordType": "A"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(query_param("name", "www.example.com."))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = RemoteSource::connect(&account(&server, "old")).unwrap();
    let zone = source.resolve_zone("example.com.").await.unwrap();
    let err = source.fetch_all(&zone).await.unwrap_err();
    match err {
        CoreError::Retrieval { zone, transient, .. } => {
            assert_eq!(zone, "example.com.");
            assert!(transient);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

// ── Pipeline ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_pipeline_between_two_accounts() {
    let old_server = MockServer::start().await;
    let new_server = MockServer::start().await;

    mount_zones(&old_server, json!([{ "Id": "/hostedzone/ZOLD", "Name": "a." }])).await;
    mount_records(
        &old_server,
        "ZOLD",
        json!([
            { "Name": "a.", "Type": "CNAME", "ResourceRecords": [{ "Value": "FOO" }] },
            { "Name": "a.", "Type": "NS", "ResourceRecords": [{ "Value": "ns-old." }] },
            { "Name": "gone.a.", "Type": "TXT", "ResourceRecords": [{ "Value": "\"x\"" }] }
        ]),
    )
    .await;

    mount_zones(&new_server, json!([{ "Id": "/hostedzone/ZNEW", "Name": "a." }])).await;
    mount_records(
        &new_server,
        "ZNEW",
        json!([
            { "Name": "a.", "Type": "NS", "ResourceRecords": [{ "Value": "ns-new." }] },
            { "Name": "a.", "Type": "CNAME", "ResourceRecords": [{ "Value": "BAR" }] }
        ]),
    )
    .await;

    let old = RemoteSource::connect(&account(&old_server, "old")).unwrap();
    let new = RemoteSource::connect(&account(&new_server, "new")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut sink = JsonFileSink::new(dir.path());

    let config = CompareConfig {
        old_zone: "a.".into(),
        new_zone: "a.".into(),
        skip_new: false,
        emit_artifacts: true,
        excluded_types: TypeExclusions::zone_apex_defaults(),
        key_policy: KeyPolicy::default(),
    };
    let report = run_comparison(&config, &old, Some(&new), &mut sink)
        .await
        .unwrap();

    let diff = report.diff.unwrap();
    assert_eq!(diff.missing.len(), 1);
    assert_eq!(diff.missing[0].name, "gone.a.");
    assert_eq!(diff.mismatched.len(), 1);
    assert_eq!(diff.mismatched[0].old.resource_records[0].value, "FOO");
    assert_eq!(diff.mismatched[0].new.resource_records[0].value, "BAR");

    for name in ["a.old.json", "a.new.json", "a.mismatched.json", "a.missing.json"] {
        assert!(dir.path().join(name).is_file(), "{name} not written");
    }
}

#[tokio::test]
async fn test_new_side_failure_writes_no_artifacts() {
    let old_server = MockServer::start().await;
    let new_server = MockServer::start().await;

    mount_zones(&old_server, json!([{ "Id": "ZOLD", "Name": "a." }])).await;
    mount_records(
        &old_server,
        "ZOLD",
        json!([{ "Name": "a.", "Type": "CNAME", "ResourceRecords": [{ "Value": "FOO" }] }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&new_server)
        .await;

    let old = RemoteSource::connect(&account(&old_server, "old")).unwrap();
    let new = RemoteSource::connect(&account(&new_server, "new")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut sink = JsonFileSink::new(dir.path());

    let config = CompareConfig {
        old_zone: "a.".into(),
        new_zone: "a.".into(),
        skip_new: false,
        emit_artifacts: true,
        excluded_types: TypeExclusions::zone_apex_defaults(),
        key_policy: KeyPolicy::default(),
    };
    let err = run_comparison(&config, &old, Some(&new), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Retrieval { .. }));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
