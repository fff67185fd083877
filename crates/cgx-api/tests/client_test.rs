#![allow(clippy::unwrap_used)]
// Integration tests for `CgxClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cgx_api::{CgxClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CgxClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CgxClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

async fn mount_profile(server: &MockServer, token: &str, tenant_id: &str) {
    Mock::given(method("GET"))
        .and(path("/v2.0/api/profile"))
        .and(header("X-Auth-Token", token))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenant_id": tenant_id,
            "email": "ops@example.com"
        })))
        .mount(server)
        .await;
}

/// A client already authenticated against tenant `t1` with token `tok`.
async fn authed() -> (MockServer, CgxClient) {
    let (server, client) = setup().await;
    mount_profile(&server, "tok", "t1").await;
    let tenant = client.use_token(SecretString::from("tok".to_string())).await.unwrap();
    assert_eq!(tenant.as_deref(), Some("t1"));
    (server, client)
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_use_token_sets_tenant() {
    let (_server, client) = authed().await;
    assert_eq!(client.tenant_id().as_deref(), Some("t1"));
    assert!(client.has_token());
}

#[tokio::test]
async fn test_use_token_without_tenant_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2.0/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "x@y" })))
        .mount(&server)
        .await;

    let tenant = client.use_token(SecretString::from("tok".to_string())).await.unwrap();
    assert!(tenant.is_none());
    assert!(client.tenant_id().is_none());
}

#[tokio::test]
async fn test_use_token_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2.0/api/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "_error": [{ "code": "UNAUTHORIZED" }]
        })))
        .mount(&server)
        .await;

    let err = client
        .use_token(SecretString::from("bad".to_string()))
        .await
        .unwrap_err();
    assert!(err.is_auth_error(), "expected auth error, got: {err:?}");
}

#[tokio::test]
async fn test_login_success_uses_issued_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/api/login"))
        .and(body_json(json!({ "email": "ops@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "x_auth_token": "issued"
        })))
        .mount(&server)
        .await;
    mount_profile(&server, "issued", "t9").await;

    let password = SecretString::from("pw".to_string());
    let tenant = client.login("ops@example.com", &password).await.unwrap();
    assert_eq!(tenant.as_deref(), Some("t9"));
}

#[tokio::test]
async fn test_login_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let password = SecretString::from("wrong".to_string());
    let result = client.login("ops@example.com", &password).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_tenant_scoped_call_requires_auth() {
    let (_server, client) = setup().await;
    let result = client.sites().await;
    assert!(matches!(result, Err(Error::NotAuthenticated)));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (server, client) = authed().await;

    Mock::given(method("GET"))
        .and(path("/v2.0/api/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await.unwrap();
    assert!(client.tenant_id().is_none());
    assert!(!client.has_token());
}

// ── Collection tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_tenant() {
    let (server, client) = authed().await;

    Mock::given(method("GET"))
        .and(path("/v2.0/api/tenants/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1",
            "name": "Acme Corp"
        })))
        .mount(&server)
        .await;

    let tenant = client.tenant().await.unwrap();
    assert_eq!(tenant.name.as_deref(), Some("Acme Corp"));
}

#[tokio::test]
async fn test_sites_unwraps_items() {
    let (server, client) = authed().await;

    Mock::given(method("GET"))
        .and(path("/v4.7/api/tenants/t1/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "items": [
                { "id": "s1", "name": "Branch 1", "element_cluster_role": "SPOKE" },
                { "id": "s2", "name": "DC East", "element_cluster_role": "HUB" }
            ]
        })))
        .mount(&server)
        .await;

    let sites = client.sites().await.unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[1].element_cluster_role.as_deref(), Some("HUB"));
}

#[tokio::test]
async fn test_wan_interface_labels() {
    let (server, client) = authed().await;

    Mock::given(method("GET"))
        .and(path("/v2.0/api/tenants/t1/waninterfacelabels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "l1",
                "name": "Metered",
                "label": "public-3",
                "description": "LTE circuits"
            }]
        })))
        .mount(&server)
        .await;

    let labels = client.wan_interface_labels().await.unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].label.as_deref(), Some("public-3"));
}

#[tokio::test]
async fn test_list_error_keeps_payload() {
    let (server, client) = authed().await;

    let payload = json!({ "_error": [{ "code": "SITE_NOT_FOUND", "message": "nope" }] });
    Mock::given(method("GET"))
        .and(path("/v4.7/api/tenants/t1/sites"))
        .respond_with(ResponseTemplate::new(500).set_body_json(&payload))
        .mount(&server)
        .await;

    match client.sites().await {
        Err(Error::Api { status, ref body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, &payload);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_replace_wan_interface_round_trips_unknown_fields() {
    let (server, client) = authed().await;

    let original = json!({
        "id": "w1",
        "name": "LTE-Primary",
        "label_id": "l1",
        "bfd_mode": "aggressive",
        "lqm_enabled": true,
        "bw_config_mode": "manual",
        "_etag": 4,
        "link_bw_down": 50.0
    });

    Mock::given(method("GET"))
        .and(path("/v2.7/api/tenants/t1/sites/s1/waninterfaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [original] })))
        .mount(&server)
        .await;

    let mut iface = client.wan_interfaces("s1").await.unwrap().remove(0);
    iface.bfd_mode = Some("non_aggressive".into());

    let expected = json!({
        "id": "w1",
        "name": "LTE-Primary",
        "label_id": "l1",
        "bfd_mode": "non_aggressive",
        "lqm_enabled": true,
        "bw_config_mode": "manual",
        "_etag": 4,
        "link_bw_down": 50.0
    });

    Mock::given(method("PUT"))
        .and(path("/v2.7/api/tenants/t1/sites/s1/waninterfaces/w1"))
        .and(header("X-Auth-Token", "tok"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .replace_wan_interface("s1", "w1", &iface)
        .await
        .unwrap();
    assert_eq!(updated.bfd_mode.as_deref(), Some("non_aggressive"));
}

#[tokio::test]
async fn test_replace_wan_interface_keeps_null_fields() {
    let (server, client) = authed().await;

    let original = json!({
        "id": "w1",
        "name": "LTE",
        "label_id": null,
        "bfd_mode": "aggressive",
        "lqm_enabled": null,
        "bw_config_mode": null,
        "_etag": 1
    });

    Mock::given(method("GET"))
        .and(path("/v2.7/api/tenants/t1/sites/s1/waninterfaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [original] })))
        .mount(&server)
        .await;

    let iface = client.wan_interfaces("s1").await.unwrap().remove(0);
    assert_eq!(iface.bw_config_mode, None);

    Mock::given(method("PUT"))
        .and(path("/v2.7/api/tenants/t1/sites/s1/waninterfaces/w1"))
        .and(body_json(&original))
        .respond_with(ResponseTemplate::new(200).set_body_json(&original))
        .expect(1)
        .mount(&server)
        .await;

    client.replace_wan_interface("s1", "w1", &iface).await.unwrap();
}
