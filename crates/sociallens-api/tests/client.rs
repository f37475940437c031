//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use sociallens_api::{
    ApiClient, ApiConfig, ApiError, BrandQuery, BrandSort, BrandsApi, ReportsApi, SettingsApi,
    TemplatesApi, UsersApi,
};
use sociallens_core::{BrandCreate, ConfigSource, SocialPlatform, SocialProfileCreate};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::with_config(
        &ApiConfig {
            base_api_url: base_url.to_string(),
            user_auth_jwt_token: "test-token".to_string(),
        },
        30,
    )
    .expect("client construction should not fail")
}

fn brand_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": null,
        "logo_url": null,
        "social_profiles": [{
            "id": "p-1",
            "platform": "twitter",
            "profile_url": "twitter.com/acme",
            "created_at": "2025-01-10T12:00:00Z"
        }],
        "status": "updated",
        "created_at": "2025-01-10T12:00:00Z",
        "updated_at": "2025-01-10T12:00:00",
        "owner_id": "u-1"
    })
}

async fn mount_config(server: &MockServer, expected_loads: u64) {
    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "BASE_API_URL": server.uri(),
            "USER_AUTH_JWT_TOKEN": "remote-token",
        })))
        .expect(expected_loads)
        .mount(server)
        .await;
}

#[tokio::test]
async fn requests_carry_bearer_token_and_version_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u-1",
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let user = client.current_user().await.expect("should fetch user");

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.display_name(), "Ada Lovelace");
}

#[tokio::test]
async fn list_brands_sends_search_and_sort() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/brands"))
        .and(query_param("search", "acme"))
        .and(query_param("sort_by", "date_added_desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "brands": [brand_json("b-1", "Acme")],
            "total": 1,
            "skip": 0,
            "limit": 100
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let query = BrandQuery {
        search: "acme".to_string(),
        sort: Some(BrandSort::DateAddedDesc),
        limit: None,
    };
    let response = client.list_brands(&query).await.expect("should list brands");

    assert_eq!(response.total, 1);
    assert_eq!(response.brands[0].name, "Acme");
    assert_eq!(
        response.brands[0].social_profiles[0].platform,
        SocialPlatform::Twitter
    );
    assert!(!response.brands[0].is_loading);
}

#[tokio::test]
async fn create_brand_posts_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/brands"))
        .and(body_json(serde_json::json!({
            "name": "Acme",
            "logo_url": null,
            "social_profiles": [{
                "platform": "twitter",
                "profile_url": "twitter.com/acme"
            }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(brand_json("b-9", "Acme")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let created = client
        .create_brand(&BrandCreate {
            name: "Acme".to_string(),
            logo_url: None,
            social_profiles: vec![SocialProfileCreate::from_url("twitter.com/acme")],
        })
        .await
        .expect("should create brand");

    assert_eq!(created.id, "b-9");
}

#[tokio::test]
async fn sync_brand_posts_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/brands/b-1/sync"))
        .and(body_json(serde_json::json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(brand_json("b-1", "Acme")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let synced = client.sync_brand("b-1").await.expect("should sync");
    assert_eq!(synced.id, "b-1");
}

#[tokio::test]
async fn error_detail_becomes_message() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/brands/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "detail": "Brand not found" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .delete_brand("missing")
        .await
        .expect_err("404 should fail");

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Brand not found");
}

#[tokio::test]
async fn error_without_detail_uses_fallback_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reports"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_reports().await.expect_err("503 should fail");

    assert_eq!(err.to_string(), "HTTP error! status: 503");
}

#[tokio::test]
async fn no_content_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/reports/42"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .delete_report(42)
        .await
        .expect("204 should be treated as success");
}

#[tokio::test]
async fn mismatched_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/brands/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_brands": "many"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.brand_stats().await.expect_err("bad body should fail");

    assert!(
        matches!(err, ApiError::Deserialize { ref context, .. } if context == "brands/stats"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn templates_accept_wrapped_payload_and_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/templates"))
        .and(query_param("search", "growth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "templates": [{
                "id": 3,
                "title": "Follower Growth",
                "description": "Track audience growth",
                "prompt": "Compare follower growth",
                "category": "growth",
                "details": "Takes about 12 minutes"
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let templates = client
        .list_templates(Some("growth"))
        .await
        .expect("should list templates");

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name, "Follower Growth");
    assert_eq!(templates[0].estimated_time_minutes, 12);
    assert!(templates[0].sample_reports.is_empty());
}

#[tokio::test]
async fn remote_config_is_loaded_once() {
    let server = MockServer::start().await;
    mount_config(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/settings/privacy"))
        .and(header("authorization", "Bearer remote-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "historical_data_days": 90,
            "refresh_frequency_hours": 6
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::new(
        ConfigSource::Url(format!("{}/config.json", server.uri())),
        30,
        "sociallens-test/0.1",
    )
    .expect("client construction should not fail");
    assert!(!client.is_configured());

    let first = client.privacy().await.expect("first request");
    let second = client.privacy().await.expect("second request");

    assert!(client.is_configured());
    assert_eq!(first, second);
    assert_eq!(first.historical_data_days, 90);
}

#[tokio::test]
async fn config_failure_is_reported_and_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::new(
        ConfigSource::Url(format!("{}/config.json", server.uri())),
        30,
        "sociallens-test/0.1",
    )
    .expect("client construction should not fail");

    for _ in 0..2 {
        let err = client.current_user().await.expect_err("config should fail");
        assert!(matches!(err, ApiError::Config { .. }), "unexpected error: {err:?}");
    }
    assert!(!client.is_configured());
}

#[tokio::test]
async fn config_file_source_is_read_from_disk() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer file-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u-2",
            "email": "grace@example.com"
        })))
        .mount(&server)
        .await;

    let path = std::env::temp_dir().join(format!(
        "sociallens-config-{}.json",
        std::process::id()
    ));
    std::fs::write(
        &path,
        serde_json::json!({
            "BASE_API_URL": server.uri(),
            "USER_AUTH_JWT_TOKEN": "file-token",
        })
        .to_string(),
    )
    .expect("write temp config");

    let client = ApiClient::new(ConfigSource::File(path.clone()), 30, "sociallens-test/0.1")
        .expect("client construction should not fail");
    let user = client.current_user().await.expect("should fetch user");
    let _ = std::fs::remove_file(&path);

    assert_eq!(user.display_name(), "grace@example.com");
}
