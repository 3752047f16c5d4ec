use anyhow::Result;
use bigpandaapi::{AlertStatus, BigPandaError, OimClient};
use httpmock::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;

fn properties(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn alert_carries_auth_header_and_tags() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/alerts")
            .header("authorization", "Bearer org-token")
            .header("content-type", "application/json")
            .json_body(json!({
                "app_key": "app123",
                "status": "warning",
                "host": "HostName",
                "check": "CheckName",
                "description": "This is a description."
            }));
        then.status(201).json_body(json!({"response": "ok"}));
    });

    let client = OimClient::with_base_url("org-token", server.base_url());
    client
        .oim_send_alert(
            "app123",
            properties(&[
                ("host", "HostName"),
                ("check", "CheckName"),
                ("description", "This is a description."),
            ]),
            AlertStatus::Warning,
            None,
        )
        .await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn alert_with_explicit_timestamp() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/alerts").json_body(json!({
            "app_key": "app123",
            "status": "ok",
            "timestamp": 1_704_164_645.0
        }));
        then.status(201);
    });

    let client = OimClient::with_base_url("org-token", server.base_url());
    client
        .oim_send_alert(
            "app123",
            BTreeMap::new(),
            AlertStatus::Ok,
            Some("2024-01-02T03:04:05Z"),
        )
        .await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn alert_naive_timestamp_is_treated_as_utc() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/alerts").json_body(json!({
            "app_key": "app123",
            "status": "critical",
            "timestamp": 1_704_164_645.0
        }));
        then.status(201);
    });

    let client = OimClient::with_base_url("org-token", server.base_url());
    client
        .oim_send_alert(
            "app123",
            BTreeMap::new(),
            AlertStatus::Critical,
            Some("2024-01-02 03:04:05"),
        )
        .await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn reserved_property_keys_do_not_override_alert_fields() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/alerts").json_body(json!({
            "app_key": "app123",
            "status": "warning",
            "timestamp": 1_704_164_645.0,
            "host": "web1"
        }));
        then.status(201);
    });

    let client = OimClient::with_base_url("org-token", server.base_url());
    client
        .oim_send_alert(
            "app123",
            properties(&[
                ("host", "web1"),
                ("app_key", "spoofed"),
                ("status", "critical"),
                ("timestamp", "yesterday"),
            ]),
            AlertStatus::Warning,
            Some("2024-01-02T03:04:05Z"),
        )
        .await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn alert_failure_surfaces_status_and_detail() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/alerts");
        then.status(401).body("invalid token");
    });

    let client = OimClient::with_base_url("bad-token", server.base_url());
    let err = client
        .oim_send_alert("app123", BTreeMap::new(), AlertStatus::Warning, None)
        .await
        .unwrap_err();

    match err {
        BigPandaError::Api { status, detail } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(detail, "invalid token");
        }
        other => panic!("unexpected error: {other}"),
    }
}
