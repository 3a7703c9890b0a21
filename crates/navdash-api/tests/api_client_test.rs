#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use reqwest::header::{HeaderName, HeaderValue};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use navdash_api::{ApiClient, Error, Link, LoginCredentials, RequestOptions, Session, SortIndexUpdate};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, Session::new());
    (server, client)
}

async fn setup_with_token(token: &str) -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client =
        ApiClient::with_client(reqwest::Client::new(), base_url, Session::with_token(token));
    (server, client)
}

fn link(name: &str, category: &str, sort_index: i64) -> Link {
    Link {
        name: name.into(),
        url: format!("https://{name}.example.com"),
        icon: String::new(),
        category: category.into(),
        sort_index,
    }
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_reads_token_from_header() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "username": "admin", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).insert_header("Authorization", "tok-123"))
        .expect(1)
        .mount(&server)
        .await;

    let creds = LoginCredentials::new("admin", "hunter2".to_string().into());
    let token = client.login(&creds).await.unwrap();

    assert_eq!(token, "tok-123");
    // login hands the token back; it does not start the session itself
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_login_without_token_header() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let creds = LoginCredentials::new("admin", "hunter2".to_string().into());
    let result = client.login(&creds).await;

    assert!(
        matches!(result, Err(Error::NoTokenReceived)),
        "expected NoTokenReceived, got: {result:?}"
    );
}

#[tokio::test]
async fn test_login_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let creds = LoginCredentials::new("admin", "wrong".to_string().into());
    let result = client.login(&creds).await;

    assert!(matches!(result, Err(Error::Unauthorized)));
}

#[tokio::test]
async fn test_validate_token_sends_authorization() {
    let (server, client) = setup_with_token("tok-abc").await;

    Mock::given(method("GET"))
        .and(path("/validate"))
        .and(header("Authorization", "tok-abc"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    client.validate_token().await.unwrap();
}

// ── Response classification ─────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_clears_session() {
    let (server, client) = setup_with_token("stale").await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.get_navigation().await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_unauthorized_clears_shared_session() {
    let (server, client) = setup_with_token("stale").await;
    let shared = client.session().clone();

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let _ = client.delete_link(0).await;

    assert!(shared.token().is_none());
}

#[tokio::test]
async fn test_http_error_carries_status() {
    let (server, client) = setup_with_token("tok").await;

    Mock::given(method("PUT"))
        .and(path("/navigation/categories"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("Cannot remove category 'dev' that is still in use"),
        )
        .mount(&server)
        .await;

    let result = client.update_categories(&["misc".into()]).await;

    match result {
        Err(Error::Http { status, ref body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("still in use"), "unexpected body: {body}");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
    // a non-401 failure leaves the session alone
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_non_json_body_yields_default() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let nav = client.get_navigation().await.unwrap();

    assert!(nav.links.is_empty());
    assert!(nav.categories.is_empty());
    assert_eq!(nav.last_modified, 0);
}

#[tokio::test]
async fn test_malformed_json_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{not json", "application/json"),
        )
        .mount(&server)
        .await;

    let result = client.get_config().await;

    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

#[tokio::test]
async fn test_request_caller_headers_override_defaults() {
    let (server, client) = setup_with_token("session-token").await;

    Mock::given(method("GET"))
        .and(path("/validate"))
        .and(header("Authorization", "explicit"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::get().header(
        HeaderName::from_static("authorization"),
        HeaderValue::from_static("explicit"),
    );
    client
        .request::<serde_json::Value>("/validate", options)
        .await
        .unwrap();
}

// ── Navigation ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_navigation() {
    let (server, client) = setup_with_token("tok").await;

    Mock::given(method("GET"))
        .and(path("/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [
                { "name": "Rust", "url": "https://rust-lang.org", "icon": "", "category": "dev", "sortIndex": 1 },
                { "name": "News", "url": "https://news.example.com", "icon": "", "category": "read", "sortIndex": 0 }
            ],
            "categories": ["dev", "read"],
            "lastModified": 1_700_000_000_123_i64
        })))
        .mount(&server)
        .await;

    let nav = client.get_navigation().await.unwrap();

    assert_eq!(nav.links.len(), 2);
    assert_eq!(nav.links[0].name, "Rust");
    assert_eq!(nav.links[0].sort_index, 1);
    assert_eq!(nav.categories, vec!["dev", "read"]);
    assert_eq!(nav.last_modified, 1_700_000_000_123);
}

#[tokio::test]
async fn test_get_last_modified() {
    let (server, client) = setup_with_token("tok").await;

    Mock::given(method("GET"))
        .and(path("/navigation/last-modified"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lastModified": 42 })))
        .mount(&server)
        .await;

    assert_eq!(client.get_last_modified().await.unwrap(), 42);
}

#[tokio::test]
async fn test_add_link() {
    let (server, client) = setup_with_token("tok").await;

    Mock::given(method("POST"))
        .and(path("/navigation/add"))
        .and(body_json(json!({
            "name": "Crates",
            "url": "https://Crates.example.com",
            "icon": "",
            "category": "dev",
            "sortIndex": 3
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client.add_link(&link("Crates", "dev", 3)).await.unwrap();
}

#[tokio::test]
async fn test_update_link_targets_position() {
    let (server, client) = setup_with_token("tok").await;

    Mock::given(method("PUT"))
        .and(path("/navigation/update/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.update_link(3, &link("Docs", "dev", 0)).await.unwrap();
}

#[tokio::test]
async fn test_delete_link_targets_position() {
    let (server, client) = setup_with_token("tok").await;

    Mock::given(method("DELETE"))
        .and(path("/navigation/delete/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_link(7).await.unwrap();
}

#[tokio::test]
async fn test_update_sort_indices_body() {
    let (server, client) = setup_with_token("tok").await;

    Mock::given(method("PUT"))
        .and(path("/navigation/sort"))
        .and(body_json(json!({
            "updates": [
                { "index": 0, "sortIndex": 1 },
                { "index": 2, "sortIndex": 0, "category": "tools" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let updates = vec![
        SortIndexUpdate {
            index: 0,
            sort_index: 1,
            category: None,
        },
        SortIndexUpdate {
            index: 2,
            sort_index: 0,
            category: Some("tools".into()),
        },
    ];
    client.update_sort_indices(&updates).await.unwrap();
}

#[tokio::test]
async fn test_update_categories_returns_navigation() {
    let (server, client) = setup_with_token("tok").await;

    Mock::given(method("PUT"))
        .and(path("/navigation/categories"))
        .and(body_json(json!({ "categories": ["dev", "tools"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [],
            "categories": ["dev", "tools"],
            "lastModified": 9
        })))
        .mount(&server)
        .await;

    let nav = client
        .update_categories(&["dev".into(), "tools".into()])
        .await
        .unwrap()
        .unwrap();

    assert_eq!(nav.categories, vec!["dev", "tools"]);
    assert_eq!(nav.last_modified, 9);
}

// ── System ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_config() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "enableNoAuth": false,
            "enableNoAuthView": true
        })))
        .mount(&server)
        .await;

    let config = client.get_config().await.unwrap();

    assert!(!config.enable_no_auth);
    assert!(config.enable_no_auth_view);
}

#[tokio::test]
async fn test_get_website_icon_encodes_url() {
    let (server, client) = setup_with_token("tok").await;

    Mock::given(method("GET"))
        .and(path("/get-icon"))
        .and(query_param("url", "https://example.com/a b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "iconData": "data:image/png;base64,UE5H" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let icon = client
        .get_website_icon("https://example.com/a b")
        .await
        .unwrap();

    assert_eq!(icon, "data:image/png;base64,UE5H");
    let decoded = navdash_api::IconData::parse(&icon).unwrap();
    assert_eq!(decoded.bytes, b"PNG");
}
